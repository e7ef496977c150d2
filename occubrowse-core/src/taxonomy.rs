use std::collections::BTreeMap;

use tracing::debug;

use crate::categories::display_name;
use crate::code::{CodePrefixes, GroupLevel};
use crate::models::Record;

/// One group of the classification (major, sub-major, minor or unit)
#[derive(Debug, Clone, PartialEq)]
pub struct GroupNode {
    pub code: String,
    pub display_name: String,
    pub level: GroupLevel,
    /// Sorted by code, groups and records interleaved
    pub children: Vec<TaxonomyChild>,
}

/// A child in the tree is either a nested group or a leaf record, never both
#[derive(Debug, Clone, PartialEq)]
pub enum TaxonomyChild {
    Group(GroupNode),
    Record(Record),
}

impl TaxonomyChild {
    /// Sort key shared by both variants
    pub fn code(&self) -> &str {
        match self {
            TaxonomyChild::Group(group) => &group.code,
            TaxonomyChild::Record(record) => &record.code,
        }
    }

    pub fn as_group(&self) -> Option<&GroupNode> {
        match self {
            TaxonomyChild::Group(group) => Some(group),
            TaxonomyChild::Record(_) => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            TaxonomyChild::Group(_) => None,
            TaxonomyChild::Record(record) => Some(record),
        }
    }
}

impl GroupNode {
    /// Direct child groups
    pub fn groups(&self) -> impl Iterator<Item = &GroupNode> {
        self.children.iter().filter_map(TaxonomyChild::as_group)
    }

    /// Records attached directly to this group
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.children.iter().filter_map(TaxonomyChild::as_record)
    }

    /// Number of records anywhere below this group
    pub fn record_count(&self) -> usize {
        self.children
            .iter()
            .map(|child| match child {
                TaxonomyChild::Group(group) => group.record_count(),
                TaxonomyChild::Record(_) => 1,
            })
            .sum()
    }
}

/// Locate a group by its code, descending only through matching prefixes
pub fn find_group<'a>(roots: &'a [GroupNode], code: &str) -> Option<&'a GroupNode> {
    let prefixes = CodePrefixes::parse(code);
    let mut path = prefixes.iter().map(|(_, prefix)| prefix);

    // Start at the major group, then step down one level per prefix
    let first = path.next()?;
    let mut current = roots.iter().find(|group| group.code == first)?;
    for prefix in path {
        current = current.groups().find(|group| group.code == prefix)?;
    }

    // A variant suffix ("2512.1") names a record, not a group
    (current.code == code).then_some(current)
}

/// Group under construction; children are keyed by code within their parent
#[derive(Debug)]
struct GroupBuilder {
    code: String,
    level: GroupLevel,
    groups: BTreeMap<String, GroupBuilder>,
    records: Vec<Record>,
}

impl GroupBuilder {
    fn new(level: GroupLevel, code: &str) -> Self {
        Self {
            code: code.to_string(),
            level,
            groups: BTreeMap::new(),
            records: Vec::new(),
        }
    }

    /// Walk the remaining prefixes, creating groups on first use, and attach
    /// the record once the path is exhausted
    fn insert(&mut self, path: &[(GroupLevel, &str)], record: &Record) {
        match path.split_first() {
            // Deepest group for this code
            None => self.records.push(record.clone()),
            Some((&(level, code), rest)) => self
                .groups
                .entry(code.to_string())
                .or_insert_with(|| GroupBuilder::new(level, code))
                .insert(rest, record),
        }
    }

    fn finish(self) -> GroupNode {
        let mut children: Vec<TaxonomyChild> = self
            .groups
            .into_values()
            .map(|group| TaxonomyChild::Group(group.finish()))
            .chain(self.records.into_iter().map(TaxonomyChild::Record))
            .collect();

        // Stable: records sharing a code keep their input order
        children.sort_by(|a, b| a.code().cmp(b.code()));

        GroupNode {
            display_name: display_name(&self.code),
            code: self.code,
            level: self.level,
            children,
        }
    }
}

/// Build the four-level classification tree from a flat record list.
///
/// Each record hangs under the deepest group its code reaches: a two-character
/// code becomes a child of its sub-major group. Records without a usable code
/// are left out of the tree.
pub fn build_taxonomy(records: &[Record]) -> Vec<GroupNode> {
    let mut roots: BTreeMap<String, GroupBuilder> = BTreeMap::new();
    let mut skipped = 0usize;

    for record in records {
        let prefixes = CodePrefixes::parse(&record.code);
        let path: Vec<(GroupLevel, &str)> = prefixes.iter().collect();

        // Empty codes (and codes like ".4") have no major group to hang under
        let Some((&(level, code), rest)) = path.split_first() else {
            debug!(key_id = %record.key_id, code = %record.code, "skipping record without code");
            skipped += 1;
            continue;
        };

        roots
            .entry(code.to_string())
            .or_insert_with(|| GroupBuilder::new(level, code))
            .insert(rest, record);
    }

    let tree: Vec<GroupNode> = roots.into_values().map(GroupBuilder::finish).collect();

    debug!(
        records = records.len(),
        skipped,
        roots = tree.len(),
        "built taxonomy"
    );

    tree
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(code: &str, label: &str) -> Record {
        Record {
            key_id: format!("key-{}-{}", code, label),
            code: code.to_string(),
            preferred_label: label.to_string(),
            ..Default::default()
        }
    }

    fn assert_sorted(nodes: &[TaxonomyChild]) {
        for pair in nodes.windows(2) {
            assert!(pair[0].code() <= pair[1].code());
        }
        for group in nodes.iter().filter_map(TaxonomyChild::as_group) {
            assert_sorted(&group.children);
        }
    }

    /// Every record sits under the group matching its deepest prefix
    fn assert_placement(group: &GroupNode) {
        for child in &group.children {
            match child {
                TaxonomyChild::Group(inner) => {
                    assert!(inner.code.starts_with(&group.code));
                    assert_placement(inner);
                }
                TaxonomyChild::Record(record) => {
                    let deepest = CodePrefixes::parse(&record.code).deepest().unwrap();
                    assert_eq!(deepest, (group.level, group.code.as_str()));
                }
            }
        }
    }

    #[test]
    fn test_software_example() {
        let records = vec![
            record("2512", "Software developer"),
            record("2511", "Systems analyst"),
        ];

        let tree = build_taxonomy(&records);

        assert_eq!(tree.len(), 1);
        let major = &tree[0];
        assert_eq!(major.code, "2");
        assert_eq!(major.display_name, "Professionals");
        assert_eq!(major.level, GroupLevel::Major);

        let sub_major = major.groups().next().unwrap();
        assert_eq!(sub_major.code, "25");
        let minor = sub_major.groups().next().unwrap();
        assert_eq!(minor.code, "251");

        let units: Vec<_> = minor.groups().collect();
        assert_eq!(units.len(), 2);
        assert_eq!(units[0].code, "2511");
        assert_eq!(units[1].code, "2512");
        assert_eq!(units[0].display_name, "Group 2511");
        assert_eq!(
            units[0].records().next().unwrap().preferred_label,
            "Systems analyst"
        );
        assert_eq!(
            units[1].records().next().unwrap().preferred_label,
            "Software developer"
        );
    }

    #[test]
    fn test_short_code_attaches_at_its_own_depth() {
        let records = vec![
            record("2512", "Software developer"),
            record("25", "ICT generalist"),
        ];

        let tree = build_taxonomy(&records);
        let sub_major = tree[0].groups().next().unwrap();

        assert_eq!(sub_major.children.len(), 2);
        assert_eq!(
            sub_major.children[0].as_record().unwrap().preferred_label,
            "ICT generalist"
        );
        assert_eq!(sub_major.children[1].as_group().unwrap().code, "251");
        assert_placement(&tree[0]);
    }

    #[test]
    fn test_variant_codes_attach_to_unit_group() {
        let records = vec![
            record("2512.3", "Mobile developer"),
            record("2512.1", "Web developer"),
            record("2512", "Software developer"),
        ];

        let tree = build_taxonomy(&records);
        let unit = find_group(&tree, "2512").unwrap();
        let codes: Vec<_> = unit.records().map(|r| r.code.as_str()).collect();

        assert_eq!(codes, vec!["2512", "2512.1", "2512.3"]);
        assert_eq!(tree[0].record_count(), 3);
    }

    #[test]
    fn test_records_without_code_are_skipped() {
        let records = vec![
            record("", "No code"),
            record(".4", "Suffix only"),
            record("3", "Tech"),
        ];

        let tree = build_taxonomy(&records);

        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].code, "3");
        assert_eq!(tree[0].record_count(), 1);
    }

    #[test]
    fn test_empty_input() {
        assert!(build_taxonomy(&[]).is_empty());
    }

    #[test]
    fn test_sorted_and_deterministic_under_permutation() {
        let mut records = vec![
            record("9621", "Courier"),
            record("1", "Manager"),
            record("2512", "Software developer"),
            record("13", "Production manager"),
            record("2511", "Systems analyst"),
            record("251", "Developer"),
            record("9611", "Garbage collector"),
        ];

        let first = build_taxonomy(&records);
        records.reverse();
        let second = build_taxonomy(&records);

        assert_eq!(first, second);
        assert_eq!(first, build_taxonomy(&records));

        let roots: Vec<_> = first.iter().map(|g| g.code.as_str()).collect();
        assert_eq!(roots, vec!["1", "2", "9"]);

        for group in &first {
            assert_sorted(&group.children);
            assert_placement(group);
        }
    }

    #[test]
    fn test_non_numeric_codes_are_grouped_verbatim() {
        let tree = build_taxonomy(&[record("AB12", "Oddity")]);

        assert_eq!(tree[0].code, "A");
        assert_eq!(tree[0].display_name, "Group A");
        assert!(find_group(&tree, "AB12").is_some());
    }

    #[test]
    fn test_find_group() {
        let tree = build_taxonomy(&[
            record("2512", "Software developer"),
            record("1321", "Plant manager"),
        ]);

        assert_eq!(
            find_group(&tree, "13").unwrap().display_name,
            "Production and specialised services managers"
        );
        assert_eq!(find_group(&tree, "251").unwrap().record_count(), 1);
        assert!(find_group(&tree, "252").is_none());
        assert!(find_group(&tree, "").is_none());
    }
}
