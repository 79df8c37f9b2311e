use std::collections::BTreeMap;

use serde::Serialize;

use crate::canonical::canonicalize;

/// Records that collapse onto the same canonical host, in input order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DuplicateCluster<T> {
    pub normalized: String,
    pub domains: Vec<T>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DuplicateReport<T> {
    pub total: usize,
    pub unique: usize,
    pub duplicates: usize,
    #[serde(rename = "duplicateList")]
    pub duplicate_list: Vec<DuplicateCluster<T>>,
}

/// Group `records` by the canonical form of `key_of(record)`.
///
/// Records with an empty key count toward `total` only. Singletons count
/// toward `unique` but are not listed. Clusters come out ordered by key,
/// compared byte-wise.
pub fn find_duplicates<T, F>(records: &[T], key_of: F) -> DuplicateReport<T>
where
    T: Clone,
    F: Fn(&T) -> &str,
{
    let groups = records
        .iter()
        .fold(BTreeMap::<String, Vec<T>>::new(), |mut groups, record| {
            let key = canonicalize(key_of(record));
            if !key.is_empty() {
                groups.entry(key).or_default().push(record.clone());
            }
            groups
        });

    let unique = groups.len();
    let duplicate_list: Vec<DuplicateCluster<T>> = groups
        .into_iter()
        .filter(|(_, members)| members.len() > 1)
        .map(|(normalized, domains)| DuplicateCluster { normalized, domains })
        .collect();

    DuplicateReport {
        total: records.len(),
        unique,
        duplicates: duplicate_list.len(),
        duplicate_list,
    }
}

impl<T> DuplicateReport<T> {
    /// Records that would disappear if every cluster were merged into one.
    pub fn redundant(&self) -> usize {
        self.duplicate_list.iter().map(|c| c.domains.len() - 1).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{DomainRecord, TrancoEntry};

    fn entries(domains: &[&str]) -> Vec<TrancoEntry> {
        domains
            .iter()
            .enumerate()
            .map(|(i, d)| TrancoEntry::new(i as u32 + 1, d))
            .collect()
    }

    fn by_domain(e: &TrancoEntry) -> &str {
        &e.domain
    }

    #[test]
    fn www_variant_clusters() {
        let input = entries(&["www.gov.tw", "pchome.com.tw", "gov.tw"]);
        let report = find_duplicates(&input, by_domain);
        assert_eq!(report.total, 3);
        assert_eq!(report.unique, 2);
        assert_eq!(report.duplicates, 1);
        let cluster = &report.duplicate_list[0];
        assert_eq!(cluster.normalized, "gov.tw");
        let members: Vec<&str> = cluster.domains.iter().map(|e| e.domain.as_str()).collect();
        assert_eq!(members, ["www.gov.tw", "gov.tw"]);
        assert_eq!(cluster.domains[0].rank, 1);
        assert_eq!(cluster.domains[1].url, "https://gov.tw");
    }

    #[test]
    fn subdomains_stay_apart() {
        let input = entries(&["shop.example.tw", "example.tw", "www.shop.example.tw"]);
        let report = find_duplicates(&input, by_domain);
        assert_eq!(report.duplicates, 1);
        assert_eq!(report.duplicate_list[0].normalized, "shop.example.tw");
        assert_eq!(report.unique, 2);
    }

    #[test]
    fn clusters_sorted_by_key() {
        let input = entries(&[
            "www.zz.tw", "zz.tw", "Www.b.tw", "www.a.tw", "B.tw", "a.tw", "WWW.B.TW",
        ]);
        let report = find_duplicates(&input, by_domain);
        let keys: Vec<&str> = report.duplicate_list.iter().map(|c| c.normalized.as_str()).collect();
        assert_eq!(keys, ["a.tw", "b.tw", "zz.tw"]);
        assert!(keys.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(report.duplicate_list[1].domains.len(), 3);
    }

    #[test]
    fn counts_add_up() {
        let input = entries(&[
            "a.tw", "www.a.tw", "A.TW", "b.tw", "c.tw", "www.c.tw", "d.tw",
        ]);
        let report = find_duplicates(&input, by_domain);
        assert_eq!(report.unique, 4);
        assert_eq!(report.redundant(), 3);
        assert_eq!(report.unique + report.redundant(), report.total);
    }

    #[test]
    fn empty_keys_counted_but_not_clustered() {
        let input = entries(&["", "  ", "www.", "x.tw", "www.x.tw"]);
        let report = find_duplicates(&input, by_domain);
        assert_eq!(report.total, 5);
        assert_eq!(report.unique, 1);
        assert_eq!(report.duplicates, 1);
        assert_eq!(report.duplicate_list[0].domains.len(), 2);
    }

    #[test]
    fn no_duplicates() {
        let input = entries(&["a.tw", "b.tw"]);
        let report = find_duplicates(&input, by_domain);
        assert!(report.duplicate_list.is_empty());
        assert_eq!(report.unique, 2);
        let none: Vec<TrancoEntry> = Vec::new();
        let empty = find_duplicates(&none, by_domain);
        assert_eq!((empty.total, empty.unique, empty.duplicates), (0, 0, 0));
    }

    #[test]
    fn serialized_shape() {
        let input = entries(&["www.gov.tw", "gov.tw"]);
        let json = serde_json::to_value(find_duplicates(&input, by_domain)).unwrap();
        assert_eq!(json["total"], 2);
        assert_eq!(json["unique"], 1);
        assert_eq!(json["duplicates"], 1);
        assert_eq!(json["duplicateList"][0]["normalized"], "gov.tw");
        assert_eq!(json["duplicateList"][0]["domains"][0]["domain"], "www.gov.tw");
        assert_eq!(json["duplicateList"][0]["domains"][0]["rank"], 1);
        assert_eq!(json["duplicateList"][0]["domains"][1]["url"], "https://gov.tw");
    }

    #[test]
    fn saved_tranco_fixture() {
        let records: Vec<DomainRecord> =
            crate::output::read_json(std::path::Path::new("tests/fixtures/tranco_list_tw.json")).unwrap();
        let report = find_duplicates(&records, DomainRecord::domain);
        assert_eq!(report.total, 10);
        assert_eq!(report.unique, 6);
        let keys: Vec<&str> = report.duplicate_list.iter().map(|c| c.normalized.as_str()).collect();
        assert_eq!(keys, ["104.com.tw", "gov.tw", "ntu.edu.tw", "shopee.tw"]);
        assert_eq!(report.unique + report.redundant(), report.total);

        let shopee = &report.duplicate_list[3];
        let ranks: Vec<Option<u32>> = shopee.domains.iter().map(|d| d.rank).collect();
        assert_eq!(ranks, [Some(411), Some(3001)]);
        assert_eq!(shopee.domains[1].domain(), "WWW.Shopee.tw");
    }

    #[test]
    fn saved_ahrefs_list_clusters_on_website() {
        let records: Vec<DomainRecord> = serde_json::from_str(
            r#"[
                {"rank": 1, "website": "www.gov.tw", "category": "Government", "search_traffic_K": 1200},
                {"rank": 2, "website": "google.com", "category": null, "search_traffic_K": 80400},
                {"rank": 3, "website": "gov.tw", "category": null, "search_traffic_K": 300}
            ]"#,
        )
        .unwrap();
        let report = find_duplicates(&records, DomainRecord::domain);
        assert_eq!((report.total, report.unique, report.duplicates), (3, 2, 1));
        assert_eq!(report.duplicate_list[0].normalized, "gov.tw");

        let json = serde_json::to_value(&report).unwrap();
        let first = &json["duplicateList"][0]["domains"][0];
        assert_eq!(first["domain"], "www.gov.tw");
        assert_eq!(first["category"], "Government");
        assert_eq!(first["search_traffic_K"], 1200);
    }

    #[test]
    fn saved_radar_list_keeps_categories() {
        let records: Vec<DomainRecord> = serde_json::from_str(
            r#"[
                {"rank": 1, "domain": "www.line.me", "categories": [{"id": 3, "name": "Chat"}]},
                {"rank": 5, "domain": "line.me", "categories": []}
            ]"#,
        )
        .unwrap();
        let json = serde_json::to_value(find_duplicates(&records, DomainRecord::domain)).unwrap();
        let members = &json["duplicateList"][0]["domains"];
        assert_eq!(members[0]["categories"][0]["name"], "Chat");
        assert_eq!(members[1]["categories"], serde_json::json!([]));
        assert!(members[0].get("url").is_none());
    }
}
