//! Output naming: `{stem}_p{NNNN}.jpg` beside the executable.
//!
//! The stem is the input file name with everything from its *last* `.`
//! removed; the page number is 1-based and zero-padded to at least four
//! digits. Documents past page 9999 get a wider field rather than a
//! truncated one.

use crate::error::PageError;
use std::path::{Path, PathBuf};

/// File name with its final extension removed.
///
/// A name without a `.` is returned unchanged.
pub fn output_stem(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(dot) => &file_name[..dot],
        None => file_name,
    }
}

/// Output file name for the 0-based `page_index` of `file_name`.
///
/// ```
/// use pdf2jpeg::pipeline::naming::output_file_name;
///
/// assert_eq!(output_file_name("Report.final.pdf", 0), "Report.final_p0001.jpg");
/// assert_eq!(output_file_name("report", 0), "report_p0001.jpg");
/// ```
pub fn output_file_name(file_name: &str, page_index: usize) -> String {
    format!("{}_p{:04}.jpg", output_stem(file_name), page_index + 1)
}

/// Full output path for a page of `input`, inside `out_dir`.
///
/// Only the file name of `input` is used; the output never lands beside the
/// source PDF unless that is `out_dir`.
pub fn output_path(out_dir: &Path, input: &Path, page_index: usize) -> Result<PathBuf, PageError> {
    let name = input
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| PageError::OutputPathUnavailable {
            page: page_index + 1,
            input: input.to_path_buf(),
        })?;

    Ok(out_dir.join(output_file_name(name, page_index)))
}
