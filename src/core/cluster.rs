//! Structural Clustering - Grouping Values by Delimiter Skeleton
//!
//! Clustering reduces every value to its delimiter skeleton (delimiters and
//! whitespace markers preserved, each character-class run collapsed to its
//! class letter, opaque literal runs to `X`) and groups values whose
//! skeletons are identical or close under a normalized edit distance. The result is a bounded set of clusters, each of which can
//! plausibly share a single synthesized pattern.
//!
//! The four stages:
//!   1. Skeleton grouping, in first-seen order
//!   2. Greedy similarity merging under `merge_threshold`
//!   3. `min_cluster_size` filtering and `max_clusters` enforcement
//!      (overflow groups fold into a single tail cluster)
//!   4. Finalization: representative selection and signature attachment

use crate::core::options::ProfileOptions;
use crate::core::tokens::{compact_signature, signature, skeleton};

/// A group of values sharing a delimiter skeleton.
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    pub id: usize,
    /// Source strings, in input order. Never empty.
    pub members: Vec<String>,
    /// Full signature of the representative.
    pub signature: String,
    /// Compact signature of the representative.
    pub compact_signature: String,
    /// The member whose length is closest to the median member length.
    pub representative: String,
}

#[derive(Debug, Clone)]
struct Group {
    skeleton: String,
    members: Vec<String>,
}

/// Group `values` into at most `options.max_clusters` clusters.
///
/// Deterministic: group order and all tie-breaks follow first-seen input
/// order. Empty input yields an empty cluster list.
pub fn cluster(values: &[String], options: &ProfileOptions) -> Vec<Cluster> {
    let mut groups = group_by_skeleton(values);
    groups = merge_similar(groups, options.merge_threshold);
    groups.retain(|g| g.members.len() >= options.min_cluster_size);
    groups = enforce_max_clusters(groups, options.max_clusters);

    groups
        .into_iter()
        .enumerate()
        .map(|(id, group)| {
            let representative = pick_representative(&group.members);
            Cluster {
                id,
                signature: signature(&representative),
                compact_signature: compact_signature(&representative),
                representative,
                members: group.members,
            }
        })
        .collect()
}

fn group_by_skeleton(values: &[String]) -> Vec<Group> {
    let mut index: std::collections::HashMap<String, usize> = std::collections::HashMap::new();
    let mut groups: Vec<Group> = Vec::new();
    for value in values {
        let sk = skeleton(value);
        match index.get(&sk) {
            Some(&at) => groups[at].members.push(value.clone()),
            None => {
                index.insert(sk.clone(), groups.len());
                groups.push(Group {
                    skeleton: sk,
                    members: vec![value.clone()],
                });
            }
        }
    }
    groups
}

/// Greedy pass: enumerate groups by descending member count and absorb every
/// later group within `threshold` of the current one.
fn merge_similar(mut groups: Vec<Group>, threshold: f64) -> Vec<Group> {
    // Stable sort keeps first-seen order among equal-sized groups.
    groups.sort_by(|a, b| b.members.len().cmp(&a.members.len()));

    let mut absorbed = vec![false; groups.len()];
    let mut merged: Vec<Group> = Vec::new();
    for i in 0..groups.len() {
        if absorbed[i] {
            continue;
        }
        let mut current = groups[i].clone();
        for j in (i + 1)..groups.len() {
            if absorbed[j] {
                continue;
            }
            if skeleton_distance(&current.skeleton, &groups[j].skeleton) <= threshold {
                current.members.extend(groups[j].members.iter().cloned());
                absorbed[j] = true;
            }
        }
        merged.push(current);
    }
    merged
}

fn enforce_max_clusters(mut groups: Vec<Group>, max_clusters: usize) -> Vec<Group> {
    if groups.len() <= max_clusters || max_clusters == 0 {
        return groups;
    }
    groups.sort_by(|a, b| b.members.len().cmp(&a.members.len()));
    let tail_groups = groups.split_off(max_clusters.saturating_sub(1));
    let mut tail_members = Vec::new();
    let mut tail_skeleton = String::new();
    for (i, group) in tail_groups.into_iter().enumerate() {
        if i == 0 {
            tail_skeleton = group.skeleton;
        }
        tail_members.extend(group.members);
    }
    groups.push(Group {
        skeleton: tail_skeleton,
        members: tail_members,
    });
    groups
}

/// Normalized skeleton distance in [0, 1].
///
/// Runs of `X` collapse to a single `X` before comparison, so skeletons that
/// differ only in run lengths compare equal. The distance is Levenshtein
/// over code points divided by the longer normalized length.
pub fn skeleton_distance(a: &str, b: &str) -> f64 {
    let a = collapse_x_runs(a);
    let b = collapse_x_runs(b);
    if a == b {
        return 0.0;
    }
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let longer = a.len().max(b.len());
    if longer == 0 {
        return 0.0;
    }
    levenshtein(&a, &b) as f64 / longer as f64
}

fn collapse_x_runs(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_x = false;
    for ch in s.chars() {
        if ch == 'X' && prev_x {
            continue;
        }
        prev_x = ch == 'X';
        out.push(ch);
    }
    out
}

/// Two-row dynamic-programming Levenshtein distance.
fn levenshtein(a: &[char], b: &[char]) -> usize {
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];
    for (i, &ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let sub = prev[j] + usize::from(ca != cb);
            curr[j + 1] = sub.min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

/// The member whose code-point length is closest to the median member
/// length. Ties break in first-seen order.
fn pick_representative(members: &[String]) -> String {
    let mut lengths: Vec<usize> = members.iter().map(|m| m.chars().count()).collect();
    lengths.sort_unstable();
    let n = lengths.len();
    let median = if n % 2 == 1 {
        lengths[n / 2] as f64
    } else {
        (lengths[n / 2 - 1] + lengths[n / 2]) as f64 / 2.0
    };

    let mut best = &members[0];
    let mut best_delta = f64::INFINITY;
    for member in members {
        let delta = (member.chars().count() as f64 - median).abs();
        if delta < best_delta {
            best_delta = delta;
            best = member;
        }
    }
    best.clone()
}
