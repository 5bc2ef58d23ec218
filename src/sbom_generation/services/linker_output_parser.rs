use crate::sbom_generation::domain::LibraryDependency;

/// LinkerOutputParser service for dynamic-linker introspection listings
///
/// Keeps lines of the form `name => /resolved/path (0xaddr)`. Headers,
/// `not found` entries, the vDSO and the interpreter line (no `=>`) are
/// discarded.
pub struct LinkerOutputParser;

impl LinkerOutputParser {
    pub fn parse(output: &str) -> Vec<LibraryDependency> {
        output.lines().filter_map(Self::parse_line).collect()
    }

    fn parse_line(line: &str) -> Option<LibraryDependency> {
        let (name, target) = line.trim().split_once("=>")?;
        let name = name.trim();
        let resolved = target.split_whitespace().next()?;

        if name.is_empty() || !resolved.starts_with('/') {
            return None;
        }

        Some(LibraryDependency::new(name, resolved))
    }
}
