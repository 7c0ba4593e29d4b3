use crate::settings::DriftRepo;

/// Colors for labels the bot creates, without the leading `#`.
pub const PALETTE: &[&str] = &[
    "c9ffe5", "ffcdd2", "f8bbd0", "e1bee7", "d1c4e9", "c5cae9", "bbdefb", "b3e5fc", "b2ebf2",
    "b2dfdb", "c8e6c9", "dcedc8", "f0f4c3", "fff9c4", "ffecb3", "ffe0b2", "ffccbc", "d7ccc8",
    "cfd8dc", "ef9a9a", "90caf9", "a5d6a7", "fff59d", "ce93d8",
];

/// Palette slot for labels created on behalf of `drift_repo`: its position
/// in the configured list, wrapped around the palette. Unconfigured repos
/// share slot 0.
pub fn color_index(drift_repos: &[DriftRepo], drift_repo: Option<&DriftRepo>) -> usize {
    drift_repo
        .and_then(|target| drift_repos.iter().position(|r| r == target))
        .map_or(0, |idx| idx % PALETTE.len())
}

pub fn color_at(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}
