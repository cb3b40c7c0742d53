// candidates.rs - Candidate taxon sets implicated by each incompatibility
//
// Every incompatibility edge implicates four taxon subsets, built from the
// left split's halves against the right split's *first* half only:
//   I1 = L.first ∩ R.first,  D1 = L.first ∖ R.first,
//   I2 = L.second ∩ R.first, D2 = L.second ∖ R.first.
// The asymmetry (never against R.second) is long-standing observed behavior
// and is kept as-is. Each subset is interned in a global label table; the
// four are then ordered ascending by size into (a, b, c, d).

use std::collections::BTreeMap;

use crate::core::split::{taxon_set_string, SplitDatabase, TaxonSet};

/// Append-only intern table mapping canonical taxon-set strings to integer
/// label ids. First occurrence assigns the next id; repeats reuse it.
#[derive(Debug, Default)]
pub struct LabelTable {
    by_string: BTreeMap<String, u32>,
    next_id: u32,
}

impl LabelTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.by_string.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_string.is_empty()
    }

    /// Intern `set`, returning its label id.
    pub fn intern(&mut self, set: &TaxonSet) -> u32 {
        let key = taxon_set_string(set);
        match self.by_string.get(&key) {
            Some(&id) => id,
            None => {
                let id = self.next_id;
                self.by_string.insert(key, id);
                self.next_id += 1;
                id
            }
        }
    }

    pub fn get(&self, set: &TaxonSet) -> Option<u32> {
        self.by_string.get(&taxon_set_string(set)).copied()
    }

    /// Label id → canonical taxon-set string, sorted by id.
    pub fn by_id(&self) -> BTreeMap<u32, String> {
        self.by_string
            .iter()
            .map(|(s, &id)| (id, s.clone()))
            .collect()
    }
}

/// The four implicated taxon subsets of one incompatibility edge, ordered
/// `a ≤ b ≤ c ≤ d` by cardinality, with their interned label ids.
#[derive(Debug, Clone)]
pub struct CandidateTaxonSet {
    pub a: TaxonSet,
    pub b: TaxonSet,
    pub c: TaxonSet,
    pub d: TaxonSet,
    pub a_id: u32,
    pub b_id: u32,
    pub c_id: u32,
    pub d_id: u32,
}

impl CandidateTaxonSet {
    fn new(sets: [TaxonSet; 4], labels: &LabelTable) -> Self {
        let mut sets = sets;
        sets.sort_by_key(|s| s.len());
        let [a, b, c, d] = sets;
        // all four were interned by the caller
        let a_id = labels.get(&a).unwrap_or(0);
        let b_id = labels.get(&b).unwrap_or(0);
        let c_id = labels.get(&c).unwrap_or(0);
        let d_id = labels.get(&d).unwrap_or(0);
        Self {
            a,
            b,
            c,
            d,
            a_id,
            b_id,
            c_id,
            d_id,
        }
    }

    pub fn ids(&self) -> [u32; 4] {
        [self.a_id, self.b_id, self.c_id, self.d_id]
    }
}

/// Build the candidate taxon sets for every edge, in 1:1 order with the
/// edge list, interning each subset into `labels` as it is first seen.
/// Duplicate split ids in either database are a fatal invariant violation.
pub fn construct_candidate_sets(
    left: &SplitDatabase,
    right: &SplitDatabase,
    edges: &[(u32, u32)],
    labels: &mut LabelTable,
) -> Result<Vec<CandidateTaxonSet>, String> {
    let left_index = left.index_by_id()?;
    let right_index = right.index_by_id()?;

    let mut candidates = Vec::with_capacity(edges.len());
    for &(left_id, right_id) in edges {
        let l = left_index
            .get(&left_id)
            .ok_or_else(|| format!("Edge references unknown left split id {}", left_id))?;
        let r = right_index
            .get(&right_id)
            .ok_or_else(|| format!("Edge references unknown right split id {}", right_id))?;

        let i1: TaxonSet = l.first().intersection(r.first()).cloned().collect();
        let d1: TaxonSet = l.first().difference(r.first()).cloned().collect();
        let i2: TaxonSet = l.second().intersection(r.first()).cloned().collect();
        let d2: TaxonSet = l.second().difference(r.first()).cloned().collect();

        labels.intern(&i1);
        labels.intern(&d1);
        labels.intern(&i2);
        labels.intern(&d2);

        candidates.push(CandidateTaxonSet::new([i1, d1, i2, d2], labels));
    }
    Ok(candidates)
}
