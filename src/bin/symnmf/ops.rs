use std::fmt::{Debug, Display};
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;
use std::str::FromStr;

use ndarray::{Array2, Axis};
use num_traits::Float;

pub(crate) const DELIMITER: &str = ",";

#[derive(Debug)]
pub(crate) struct FileParseError {
    pub message: String,
}

/// Reads in a file formatted as (comma separated):
///     val1,val2,val3
///     val1,val2,val3
///
/// One data point per row, as many coordinates as desired
/// All rows should be same length
/// Values should be floating-point decimal values
pub(crate) fn from_file<F>(p: PathBuf) -> Result<Array2<F>, FileParseError>
where
    F: Float + Default + FromStr,
    <F as FromStr>::Err: Debug,
{
    let reader = BufReader::new(File::open(p).expect("Unable to open file"));
    let mut data = Vec::new();
    // Read comma-delimited file
    for (idx, line) in reader.lines().map(|l| l.unwrap()).enumerate() {
        let mut entry: Vec<F> = vec![];
        for s in line.split(DELIMITER) {
            match s.parse::<F>() {
                Ok(v) => {
                    entry.push(v);
                }
                Err(_) => {
                    return Err(FileParseError {
                        message: format!("Error parsing file at line {}", idx + 1),
                    })
                }
            };
        }
        data.push(entry);
    }
    // Validate data was loaded
    if data.is_empty() {
        return Err(FileParseError {
            message: "Data file is empty".to_string(),
        });
    }
    // Validate data all has same length
    let length = data[0].len();
    for v in data.iter() {
        if v.len() != length {
            return Err(FileParseError {
                message: "Input data rows must all be same length!".to_string(),
            });
        }
    }
    // Convert data to Array2
    let mut out = Array2::<F>::default((data.len(), length));
    out.axis_iter_mut(Axis(0))
        .enumerate()
        .for_each(|(idx1, mut row)| {
            row.iter_mut().enumerate().for_each(|(idx2, col)| {
                *col = data[idx1][idx2];
            });
        });
    Ok(out)
}

/// Write each matrix row on its own line, entries comma-separated with
/// four decimal digits
pub(crate) fn write_matrix<F, W>(matrix: &Array2<F>, writer: &mut W)
where
    F: Float + Display,
    W: Write,
{
    matrix.axis_iter(Axis(0)).for_each(|row| {
        let mut it = row.iter();
        writer
            .write_all(format!("{:.4}", it.next().unwrap()).as_ref())
            .unwrap();
        it.for_each(|v| {
            writer.write_all(DELIMITER.as_bytes()).unwrap();
            writer.write_all(format!("{:.4}", v).as_ref()).unwrap();
        });
        writer.write_all(b"\n").unwrap();
    });
    writer.flush().unwrap();
}

#[cfg(test)]
mod test {
    use std::io::Write;

    use ndarray::arr2;
    use tempfile::NamedTempFile;

    use crate::ops::{from_file, write_matrix};

    #[test]
    fn valid_load() {
        // Write tempdata
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "1.0,5.0,1.0").unwrap();
        writeln!(file, "2.0,4.0,2.0").unwrap();
        writeln!(file, "3.0,3.0,3.0").unwrap();
        // Read into starting data
        let data = from_file::<f32>(file.path().to_path_buf()).unwrap();
        let expected = arr2(&[[1., 5., 1.], [2., 4., 2.], [3., 3., 3.]]);
        assert_eq!(data, expected);
    }

    #[test]
    fn valid_load_single_column() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "1.5").unwrap();
        writeln!(file, "-2.5").unwrap();
        let data = from_file::<f64>(file.path().to_path_buf()).unwrap();
        assert_eq!(data, arr2(&[[1.5], [-2.5]]));
    }

    #[test]
    fn valid_load_single_row() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "1.0,2.0").unwrap();
        let data = from_file::<f64>(file.path().to_path_buf()).unwrap();
        assert_eq!(data, arr2(&[[1., 2.]]));
    }

    #[test]
    #[should_panic]
    fn invalid_load_empty_file() {
        let file = NamedTempFile::new().unwrap();
        let _ = from_file::<f32>(file.path().to_path_buf()).unwrap();
    }

    #[test]
    #[should_panic]
    fn invalid_load_mismatched_data() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "1.0,5.0,1.0").unwrap();
        writeln!(file, "2.0,4.0").unwrap();
        writeln!(file, "1.0,5.0,1.0").unwrap();
        let _ = from_file::<f32>(file.path().to_path_buf()).unwrap();
    }

    #[test]
    #[should_panic]
    fn invalid_blank_line() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "1.0,5.0,1.0").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "1.0,5.0,1.0").unwrap();
        let _ = from_file::<f32>(file.path().to_path_buf()).unwrap();
    }

    #[test]
    #[should_panic]
    fn invalid_load_invalid_data() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "1.0,5.0,1.0").unwrap();
        writeln!(file, "a,b,c").unwrap();
        let _ = from_file::<f32>(file.path().to_path_buf()).unwrap();
    }

    #[test]
    #[should_panic]
    fn invalid_tab_delimited_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "1.0\t5.0\t1.0").unwrap();
        writeln!(file, "2.0\t4.0\t2.0").unwrap();
        let _ = from_file::<f32>(file.path().to_path_buf()).unwrap();
    }

    #[test]
    fn four_decimal_output() {
        let matrix = arr2(&[[0., 0.60653066], [1., 2.5]]);
        let mut out: Vec<u8> = Vec::new();
        write_matrix(&matrix, &mut out);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "0.0000,0.6065\n1.0000,2.5000\n"
        );
    }

    #[test]
    fn single_cell_output() {
        let matrix = arr2(&[[0.70710678_f32]]);
        let mut out: Vec<u8> = Vec::new();
        write_matrix(&matrix, &mut out);
        assert_eq!(String::from_utf8(out).unwrap(), "0.7071\n");
    }
}
