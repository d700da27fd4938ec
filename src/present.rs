//! Fixed-layout row rendering shared by the index variants.
//!
//! The column widths are an output-compatibility contract: tokens sit in a
//! 10-character left-justified field and numbers in a 4-character
//! right-justified field, with a single space between fields. Integer sets
//! render ascending, comma-separated, in angle brackets (`<1,2,3>`).

use std::io::{self, Write};

/// Width of the left-justified token column.
pub const TOKEN_WIDTH: usize = 10;
/// Width of the right-justified number column.
pub const NUMBER_WIDTH: usize = 4;

/// Render an ascending sequence of integers as `<n1,n2,...,nk>`.
pub fn angle_list<I>(numbers: I) -> String
where
    I: IntoIterator<Item = usize>,
{
    let mut out = String::from("<");
    for (i, n) in numbers.into_iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&n.to_string());
    }
    out.push('>');
    out
}

/// One counter row: `token      count`.
pub fn write_count_row(sink: &mut dyn Write, token: &str, count: u64) -> io::Result<()> {
    writeln!(sink, "{token:<TOKEN_WIDTH$} {count:>NUMBER_WIDTH$}")
}

/// One line-index row: `token      <l1,l2,...>`.
pub fn write_line_set_row<I>(sink: &mut dyn Write, token: &str, lines: I) -> io::Result<()>
where
    I: IntoIterator<Item = usize>,
{
    writeln!(sink, "{token:<TOKEN_WIDTH$} {}", angle_list(lines))
}

/// Position-index header row: the bare token.
pub fn write_token_header(sink: &mut dyn Write, token: &str) -> io::Result<()> {
    writeln!(sink, "{token}")
}

/// Position-index detail row: blank token field, line number, position set.
pub fn write_position_row<I>(sink: &mut dyn Write, line: usize, positions: I) -> io::Result<()>
where
    I: IntoIterator<Item = usize>,
{
    writeln!(
        sink,
        "{:>TOKEN_WIDTH$} {line:>NUMBER_WIDTH$} {}",
        "",
        angle_list(positions)
    )
}
