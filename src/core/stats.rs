// stats.rs - Moved-matrix construction and the candidate confidence filter
//
// Inputs are the paired per-taxon-pair distance vectors of the two
// segments. Each pair gets a folded z-score and a log p-value; the moved
// matrix labels pairs {+1, -1, 0} under a multiple-testing corrected
// e-value cut, and candidate taxon sets are then tested against each other
// with one-sided binomial tails over the cross-pair labels.

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::collections::BTreeMap;

use crate::core::candidates::CandidateTaxonSet;
use crate::core::numerics::{betai, normal_tail_ln};
use crate::core::split::TaxonSet;
use crate::data::DistRecord;

/// Symmetric taxon-pair-keyed log p-values.
pub type DistanceMatrix = BTreeMap<String, BTreeMap<String, f64>>;

/// Tri-state labels: +1 moved apart, -1 moved together, 0 not significant.
pub type MovedMatrix = BTreeMap<String, BTreeMap<String, i8>>;

/// Per-pair test results from the paired distance files.
#[derive(Debug, Default)]
pub struct PairTests {
    pub log_pvalues: DistanceMatrix,
    pub is_greater: BTreeMap<String, BTreeMap<String, bool>>,
}

fn average(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn std_dev(values: &[f64]) -> f64 {
    let avg = average(values);
    let mut sum: f64 = values.iter().map(|v| (v - avg) * (v - avg)).sum();
    if sum == 0.0 {
        sum = 1.0; // degenerate constant vector
    }
    let denom = values.len().saturating_sub(1).max(1);
    (sum / denom as f64).sqrt()
}

/// Folded two-sided z-test between two distance vectors. Returns the log
/// p-value and whether the left average exceeds the right.
fn compute_pvalue(dist1: &[f64], dist2: &[f64]) -> (f64, bool) {
    let z_score = (average(dist1) - average(dist2)) / std_dev(dist1).max(std_dev(dist2));
    let corrected = 2.0 * (z_score * z_score).sqrt();
    (normal_tail_ln(corrected), z_score > 0.0)
}

/// Run the paired z-test over two aligned distance files. Lines must pair
/// up by taxon pair; a mismatch is fatal for the segment pair. Per-line
/// computation is pure and runs in parallel.
pub fn compute_pair_distances(
    left: &[DistRecord],
    right: &[DistRecord],
) -> Result<PairTests, String> {
    if left.len() != right.len() {
        return Err(format!(
            "Paired distance files disagree on pair count: {} vs {}",
            left.len(),
            right.len()
        ));
    }

    let pb = ProgressBar::new(left.len() as u64);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} pair tests")
        .map_err(|e| format!("Invalid progress bar template: {}", e))?;
    pb.set_style(style.progress_chars("#>-"));

    let rows: Vec<(String, String, f64, bool)> = left
        .par_iter()
        .zip(right.par_iter())
        .map(|(l, r)| {
            if l.taxon1 != r.taxon1 || l.taxon2 != r.taxon2 {
                return Err(format!(
                    "Paired distance files disagree on taxon pair: ({} {}) vs ({} {})",
                    l.taxon1, l.taxon2, r.taxon1, r.taxon2
                ));
            }
            let (log_pvalue, is_greater) = compute_pvalue(&l.values, &r.values);
            pb.inc(1);
            Ok((l.taxon1.clone(), l.taxon2.clone(), log_pvalue, is_greater))
        })
        .collect::<Result<_, String>>()?;

    pb.finish_and_clear();

    let mut tests = PairTests::default();
    for (t1, t2, log_pvalue, is_greater) in rows {
        tests
            .log_pvalues
            .entry(t1.clone())
            .or_default()
            .insert(t2.clone(), log_pvalue);
        tests
            .is_greater
            .entry(t1)
            .or_default()
            .insert(t2, is_greater);
    }
    Ok(tests)
}

/// Label every taxon pair {+1, -1, 0} under the corrected significance
/// test `numPairs * exp(logP) < evalue_threshold`, and report the
/// empirical +1/-1 frequencies.
pub fn compute_moved_matrix(
    tests: &PairTests,
    evalue_threshold: f64,
) -> Result<(MovedMatrix, f64, f64), String> {
    let num_tests: usize = tests.is_greater.values().map(|m| m.len()).sum();

    let mut moved = MovedMatrix::new();
    let mut ge_count = 0usize;
    let mut le_count = 0usize;

    for (t1, row) in &tests.is_greater {
        for (t2, &greater) in row {
            let log_pvalue = *tests
                .log_pvalues
                .get(t1)
                .and_then(|r| r.get(t2))
                .ok_or_else(|| {
                    format!("Taxon pair ({}, {}) has a direction but no p-value", t1, t2)
                })?;
            let pvalue = log_pvalue.exp_m1() + 1.0;
            let significant = (num_tests as f64) * pvalue < evalue_threshold;

            let label = if greater && significant {
                ge_count += 1;
                1
            } else if !greater && significant {
                le_count += 1;
                -1
            } else {
                0
            };
            moved.entry(t1.clone()).or_default().insert(t2.clone(), label);
        }
    }

    if num_tests == 0 {
        return Ok((moved, 0.0, 0.0));
    }
    let ge_freq = ge_count as f64 / num_tests as f64;
    let le_freq = le_count as f64 / num_tests as f64;
    Ok((moved, ge_freq, le_freq))
}

/// Symmetric lookup in the moved matrix; a missing pair is an invariant
/// violation between the distance files and the candidate sets.
fn moved_item(moved: &MovedMatrix, a: &str, b: &str) -> Result<i8, String> {
    if let Some(v) = moved.get(a).and_then(|row| row.get(b)) {
        return Ok(*v);
    }
    if let Some(v) = moved.get(b).and_then(|row| row.get(a)) {
        return Ok(*v);
    }
    Err(format!("Taxon pair ({}, {}) missing from the moved matrix", a, b))
}

/// One-sided binomial tail: probability of seeing `count` or more
/// successes in `n` trials at background frequency `freq`.
fn binomial_pvalue(count: usize, n: usize, freq: f64) -> f64 {
    if n == 0 || count as f64 / n as f64 <= freq {
        return 1.0;
    }
    betai(count as f64 + 1.0, (n - count) as f64, freq)
}

/// Compare two candidate label sets: count cross-pairs labeled +1 vs -1
/// and convert both counts into one-sided binomial tails against the
/// background frequencies.
pub fn compare_sets(
    a: &TaxonSet,
    b: &TaxonSet,
    moved: &MovedMatrix,
    ge_freq: f64,
    le_freq: f64,
) -> Result<(f64, f64), String> {
    let mut ge_count = 0usize;
    let mut le_count = 0usize;

    for ta in a {
        for tb in b {
            match moved_item(moved, ta, tb)? {
                1 => ge_count += 1,
                -1 => le_count += 1,
                _ => {}
            }
        }
    }

    let n = a.len() * b.len();
    Ok((
        binomial_pvalue(ge_count, n, ge_freq),
        binomial_pvalue(le_count, n, le_freq),
    ))
}

/// Decide whether set `a` has "moved" relative to `others`. Heuristic, not
/// a formal hypothesis test: each comparison adds 1.0 to the significant
/// direction, or 0.5 to both when both directions are significant, and `a`
/// moved iff accumulatedGreater * accumulatedLesser >= 0.5. Preserved
/// exactly for compatibility.
pub fn test_candidate(
    a: &TaxonSet,
    others: [&TaxonSet; 3],
    moved: &MovedMatrix,
    ge_freq: f64,
    le_freq: f64,
    evalue_threshold: f64,
) -> Result<bool, String> {
    let mut greater = 0.0;
    let mut lesser = 0.0;

    for other in others {
        let (ge_pval, le_pval) = compare_sets(a, other, moved, ge_freq, le_freq)?;
        if ge_pval < evalue_threshold {
            greater += if le_pval < evalue_threshold { 0.5 } else { 1.0 };
        }
        if le_pval < evalue_threshold {
            lesser += if ge_pval < evalue_threshold { 0.5 } else { 1.0 };
        }
    }

    Ok(greater * lesser >= 0.5)
}

/// One output row of the labeled incompatibility graph.
pub type LabeledRow = (u32, u32, Vec<u32>);

/// Unfiltered rows: every edge keeps all four candidate labels.
pub fn all_candidate_rows(
    edges: &[(u32, u32)],
    candidates: &[CandidateTaxonSet],
) -> Vec<LabeledRow> {
    edges
        .iter()
        .zip(candidates)
        .map(|(&(l, r), c)| (l, r, c.ids().to_vec()))
        .collect()
}

/// Filter each edge's candidate labels by the moved test. Sets a, b and c
/// are always tested; d only when its size ties with c (the "largest" set
/// is then not unique) or when exhaustive testing is requested.
pub fn filter_labeled_graph(
    edges: &[(u32, u32)],
    candidates: &[CandidateTaxonSet],
    moved: &MovedMatrix,
    ge_freq: f64,
    le_freq: f64,
    evalue_threshold: f64,
    test_all: bool,
) -> Result<Vec<LabeledRow>, String> {
    let mut rows = Vec::with_capacity(edges.len());
    for (&(left, right), cand) in edges.iter().zip(candidates) {
        let mut labels = Vec::new();

        if test_candidate(
            &cand.a,
            [&cand.b, &cand.c, &cand.d],
            moved,
            ge_freq,
            le_freq,
            evalue_threshold,
        )? {
            labels.push(cand.a_id);
        }
        if test_candidate(
            &cand.b,
            [&cand.a, &cand.c, &cand.d],
            moved,
            ge_freq,
            le_freq,
            evalue_threshold,
        )? {
            labels.push(cand.b_id);
        }
        if test_candidate(
            &cand.c,
            [&cand.a, &cand.b, &cand.d],
            moved,
            ge_freq,
            le_freq,
            evalue_threshold,
        )? {
            labels.push(cand.c_id);
        }
        if (test_all || cand.d.len() == cand.c.len())
            && test_candidate(
                &cand.d,
                [&cand.a, &cand.b, &cand.c],
                moved,
                ge_freq,
                le_freq,
                evalue_threshold,
            )?
        {
            labels.push(cand.d_id);
        }

        rows.push((left, right, labels));
    }
    Ok(rows)
}
