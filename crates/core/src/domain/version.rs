// Version Output Parsing (pure)

use semver::Version;

/// Marker preceding the version triple in `-Vv` output.
const VERSION_MARKER: &str = "Version: ";

/// Scan version-flag output for a `Version: <major>.<minor>.<patch>` marker
/// and parse the triple.
///
/// Returns `None` when no line carries a parseable marker. An unrecognized
/// format signals unexpected output, not necessarily the wrong binary.
pub fn parse_version_output(output: &str) -> Option<Version> {
    output.lines().find_map(parse_version_line)
}

fn parse_version_line(line: &str) -> Option<Version> {
    let rest = line.split(VERSION_MARKER).nth(1)?;
    let triple: String = rest
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    Version::parse(&triple).ok()
}
