use crate::error::SizeMismatchWarning;

/// Outcome of a successful export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportReport {
    /// Number of images written.
    pub exported: usize,
    /// Entries whose declared size differs from their computed mip chain size.
    pub warnings: Vec<SizeMismatchWarning>,
}

/// Outcome of a successful import.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Entries whose image changed and which were re-encoded into the archive.
    pub reencoded: usize,
    /// Entries whose image matched the archive and were left untouched.
    pub unchanged: usize,
    /// Entries whose declared size differs from their computed mip chain size.
    pub warnings: Vec<SizeMismatchWarning>,
}

impl ImportReport {
    /// Whether the archive buffer was modified.
    #[inline]
    pub fn modified(&self) -> bool {
        self.reencoded != 0
    }
}
