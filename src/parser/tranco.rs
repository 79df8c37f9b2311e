use crate::records::TrancoEntry;

/// Entries of a Tranco `rank,domain` list whose domain ends in `.<tld>`.
pub struct TrancoList {
    pub entries: Vec<TrancoEntry>,
    /// Lines in the input, blank ones included.
    pub lines: usize,
}

pub fn parse_tranco_csv(csv: &str, tld: &str) -> TrancoList {
    let suffix = format!(".{}", tld.trim_start_matches('.'));
    let mut entries = Vec::new();
    let mut lines = 0usize;

    for line in csv.split('\n') {
        lines += 1;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let mut fields = line.split(',');
        let (Some(rank), Some(domain)) = (fields.next(), fields.next()) else {
            continue;
        };
        let Ok(rank) = rank.trim().parse::<u32>() else {
            continue;
        };
        let domain = domain.trim();

        if domain.ends_with(&suffix) {
            entries.push(TrancoEntry::new(rank, domain));
        }
    }

    TrancoList { entries, lines }
}
