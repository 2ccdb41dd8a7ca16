// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! INP text emitters
//!
//! Low-level writers for the keyword dialect read by the solver. Output is
//! compared byte for byte downstream, so separators, numbering and number
//! formatting are fixed:
//!
//! - node and element numbers are 1-based
//! - coordinates use 10 significant digits, other numbers 6 (`%g` style)
//! - index lists wrap after every 16th entry

use nalgebra::Point3;
use std::io::{self, Write};

/// Entries per line of an index listing
pub const ENTRIES_PER_LINE: usize = 16;

/// Significant digits of node coordinates
pub const NODE_PRECISION: usize = 10;

/// Significant digits of plain numbers
pub const NUMBER_PRECISION: usize = 6;

/// Element type of every hexahedron written
pub const ELEMENT_TYPE: &str = "C3D8P";

/// Format a number like C's `%.<precision>g`
///
/// Scientific notation is used when the decimal exponent is below -4 or at
/// least `precision`; trailing zeros are removed in both notations.
pub fn format_general(value: f64, precision: usize) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let precision = precision.max(1);
    let scientific = format!("{:.*e}", precision - 1, value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (scientific.as_str(), 0),
    };

    if exponent < -4 || exponent >= precision as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{}{:02}",
            strip_trailing_zeros(mantissa),
            sign,
            exponent.unsigned_abs()
        )
    } else {
        let decimals = (precision as i32 - 1 - exponent).max(0) as usize;
        strip_trailing_zeros(&format!("{:.*}", decimals, value)).to_string()
    }
}

/// Format a number like C++ `std::to_string` (six decimals)
pub fn format_fixed(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    format!("{:.6}", value)
}

fn strip_trailing_zeros(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}

pub fn print_line<W: Write + ?Sized>(stream: &mut W, line: &str) -> io::Result<()> {
    writeln!(stream, "{}", line)
}

/// Keyword line, `*` + heading
pub fn print_heading<W: Write + ?Sized>(stream: &mut W, heading: &str) -> io::Result<()> {
    writeln!(stream, "*{}", heading)
}

/// Comment line, `** ` + comment
pub fn print_comment<W: Write + ?Sized>(stream: &mut W, comment: &str) -> io::Result<()> {
    writeln!(stream, "** {}", comment)
}

/// Comment framed by empty comment lines
pub fn print_section_comment<W: Write + ?Sized>(stream: &mut W, comment: &str) -> io::Result<()> {
    print_comment(stream, "")?;
    print_comment(stream, comment)?;
    print_comment(stream, "")
}

/// `*Node` block, one numbered line per node
pub fn print_nodes<W: Write + ?Sized>(stream: &mut W, nodes: &[Point3<f64>]) -> io::Result<()> {
    print_heading(stream, "Node")?;
    for (i, node) in nodes.iter().enumerate() {
        writeln!(
            stream,
            "{}, {}, {}, {}",
            i + 1,
            format_general(node.x, NODE_PRECISION),
            format_general(node.y, NODE_PRECISION),
            format_general(node.z, NODE_PRECISION)
        )?;
    }
    Ok(())
}

/// `*Element` block of 8-node hexahedra with 1-based node numbers
pub fn print_elements<W: Write + ?Sized>(stream: &mut W, elements: &[[usize; 8]]) -> io::Result<()> {
    print_heading(stream, &format!("Element, type={}", ELEMENT_TYPE))?;
    for (i, element) in elements.iter().enumerate() {
        write!(stream, "{}", i + 1)?;
        for node in element {
            write!(stream, ", {}", node + 1)?;
        }
        writeln!(stream)?;
    }
    Ok(())
}

/// Index listing of 0-based indices written 1-based
///
/// Nothing is written for an empty list.
pub fn print_element_list<W: Write + ?Sized>(stream: &mut W, indices: &[usize]) -> io::Result<()> {
    let Some(last) = indices.len().checked_sub(1) else {
        return Ok(());
    };
    for (i, index) in indices.iter().enumerate() {
        write!(stream, "{}", index + 1)?;
        if i == last {
            writeln!(stream)?;
        } else if (i + 1) % ENTRIES_PER_LINE == 0 {
            writeln!(stream, ",")?;
        } else {
            write!(stream, ", ")?;
        }
    }
    Ok(())
}

fn set_declaration(keyword: &str, name: &str, internal: bool, generate: bool) -> String {
    let keyword_lower = keyword.to_lowercase();
    let mut line = format!("{}, {}={}", keyword, keyword_lower, name);
    if internal {
        line.push_str(", internal");
    }
    if generate {
        line.push_str(", generate");
    }
    line
}

/// Node set over the 1-based range `start..=end`
pub fn print_node_set_generate<W: Write + ?Sized>(
    stream: &mut W,
    name: &str,
    start: usize,
    end: usize,
    internal: bool,
) -> io::Result<()> {
    print_heading(stream, &set_declaration("Nset", name, internal, true))?;
    writeln!(stream, "{}, {}, 1", start, end)
}

/// Explicit node set of 0-based node indices
pub fn print_node_set<W: Write + ?Sized>(
    stream: &mut W,
    name: &str,
    internal: bool,
    nodes: &[usize],
) -> io::Result<()> {
    print_heading(stream, &set_declaration("Nset", name, internal, false))?;
    print_element_list(stream, nodes)
}

/// Element set over the 1-based range `start..=end`
pub fn print_element_set_generate<W: Write + ?Sized>(
    stream: &mut W,
    name: &str,
    start: usize,
    end: usize,
    internal: bool,
) -> io::Result<()> {
    print_heading(stream, &set_declaration("Elset", name, internal, true))?;
    writeln!(stream, "{}, {}, 1", start, end)
}

/// Explicit element set of 0-based element indices
pub fn print_element_set<W: Write + ?Sized>(
    stream: &mut W,
    name: &str,
    internal: bool,
    elements: &[usize],
) -> io::Result<()> {
    print_heading(stream, &set_declaration("Elset", name, internal, false))?;
    print_element_list(stream, elements)
}

/// Element-based surface on side `S<face>` of an element set
pub fn print_surface<W: Write + ?Sized>(
    stream: &mut W,
    surface_name: &str,
    set_name: &str,
    face: u8,
) -> io::Result<()> {
    print_heading(stream, &format!("Surface, type=ELEMENT, name={}", surface_name))?;
    writeln!(stream, "{}, S{}", set_name, face)
}

/// Single number followed by a comma
pub fn print_number<W: Write + ?Sized>(stream: &mut W, value: f64) -> io::Result<()> {
    writeln!(stream, "{},", format_general(value, NUMBER_PRECISION))
}

/// Numbers on one line separated by `, `
pub fn print_numbers<W: Write + ?Sized>(stream: &mut W, values: &[f64]) -> io::Result<()> {
    let line = values
        .iter()
        .map(|v| format_general(*v, NUMBER_PRECISION))
        .collect::<Vec<_>>()
        .join(", ");
    writeln!(stream, "{}", line)
}
