//! Downstream impact graph traversal
//!
//! Bounded breadth-first expansion from a set of seed assets over the
//! lineage source. The downstream graph is not guaranteed acyclic, so an
//! identity is expanded at most once; an identity reachable both at depth
//! one and deeper is always classified direct.

use blastradius_catalog::LineageSource;
use blastradius_core::{
    AssetIdentity, Classification, IdentityKey, ImpactRecord, TraversalLimits, TraversalNote,
};
use std::collections::{HashSet, VecDeque};
use tracing::debug;

/// Result of one traversal run
///
/// No identity key appears twice across `direct` and `indirect`.
#[derive(Debug, Clone, Default)]
pub struct WalkOutcome {
    /// Assets one hop from a seed
    pub direct: Vec<ImpactRecord>,

    /// Assets two or more hops from every seed
    pub indirect: Vec<ImpactRecord>,

    /// Ceiling warnings, when the walk returned a partial result
    pub notes: Vec<TraversalNote>,
}

/// Bounded downstream graph walker
pub struct ImpactWalker<'a> {
    lineage: &'a dyn LineageSource,
    key: IdentityKey,
    limits: TraversalLimits,
}

impl<'a> ImpactWalker<'a> {
    /// Create a walker over a lineage source
    pub fn new(lineage: &'a dyn LineageSource, key: IdentityKey, limits: TraversalLimits) -> Self {
        Self {
            lineage,
            key,
            limits,
        }
    }

    /// Expand the downstream graph from the given seeds
    ///
    /// A lineage failure at any node surfaces as an empty edge list and
    /// the walk continues over siblings; partial results are always
    /// preferred over a failed run.
    pub async fn walk(&self, seeds: &[AssetIdentity]) -> WalkOutcome {
        let mut expanded: HashSet<String> = HashSet::new();
        let mut direct_keys: HashSet<String> = HashSet::new();
        let mut indirect_keys: HashSet<String> = HashSet::new();
        let mut direct: Vec<ImpactRecord> = Vec::new();
        let mut indirect: Vec<ImpactRecord> = Vec::new();
        let mut frontier: VecDeque<(AssetIdentity, u32)> = VecDeque::new();
        let mut dropped = 0usize;
        let mut record_limit_hit = false;
        let mut depth_limit_hit = false;

        // Depth 1: every edge off a seed is a direct impact. Seeds are
        // marked expanded here so a cycle back into one never re-expands.
        'seeds: for seed in seeds {
            if !expanded.insert(self.key.of(seed)) {
                continue;
            }
            for edge in self.lineage.downstream(seed).await {
                if direct.len() >= self.limits.max_records {
                    record_limit_hit = true;
                    break 'seeds;
                }
                let key = self.key.of(&edge.target);
                if !direct_keys.insert(key) {
                    dropped += 1;
                    continue;
                }
                frontier.push_back((edge.target.clone(), 1));
                direct.push(ImpactRecord::from_edge(&edge, 1, Classification::Direct));
            }
        }

        // Depth >= 2: breadth-first over the frontier. The visited-set
        // check happens before expansion, which is the termination
        // guarantee on cyclic input.
        'walk: while let Some((identity, depth)) = frontier.pop_front() {
            if record_limit_hit {
                break;
            }
            if !expanded.insert(self.key.of(&identity)) {
                continue;
            }
            if depth >= self.limits.max_depth {
                depth_limit_hit = true;
                continue;
            }

            for edge in self.lineage.downstream(&identity).await {
                if direct.len() + indirect.len() >= self.limits.max_records {
                    record_limit_hit = true;
                    break 'walk;
                }
                let key = self.key.of(&edge.target);
                // Direct classification takes priority over any indirect
                // path; within a partition, first occurrence wins.
                if direct_keys.contains(&key) || !indirect_keys.insert(key) {
                    dropped += 1;
                    continue;
                }
                frontier.push_back((edge.target.clone(), depth + 1));
                indirect.push(ImpactRecord::from_edge(
                    &edge,
                    depth + 1,
                    Classification::Indirect,
                ));
            }
        }

        if dropped > 0 {
            debug!(dropped, "duplicate identities dropped during traversal");
        }

        let mut notes = Vec::new();
        if depth_limit_hit {
            notes.push(TraversalNote::DepthLimitReached {
                depth: self.limits.max_depth,
            });
        }
        if record_limit_hit {
            notes.push(TraversalNote::RecordLimitReached {
                records: self.limits.max_records,
            });
        }

        WalkOutcome {
            direct,
            indirect,
            notes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blastradius_catalog::MockCatalog;
    use blastradius_core::{FlowDirection, LineageEdge};
    use pretty_assertions::assert_eq;
    use std::collections::BTreeSet;

    fn id(entity: &str) -> AssetIdentity {
        AssetIdentity::new(format!("a-{entity}"), "c-1", entity)
    }

    fn edge(entity: &str) -> LineageEdge {
        LineageEdge {
            target: id(entity),
            name: entity.to_string(),
            connection_name: "warehouse".to_string(),
            flow: FlowDirection::Downstream,
        }
    }

    fn walker(mock: &MockCatalog) -> ImpactWalker<'_> {
        ImpactWalker::new(mock, IdentityKey::AssetTriple, TraversalLimits::default())
    }

    fn names(records: &[ImpactRecord]) -> BTreeSet<String> {
        records.iter().map(|r| r.name.clone()).collect()
    }

    #[tokio::test]
    async fn direct_and_indirect_partition() {
        // A -> [B, C], B -> [D], C -> [], D -> []
        let mock = MockCatalog::new()
            .with_downstream(&id("a"), vec![edge("b"), edge("c")])
            .with_downstream(&id("b"), vec![edge("d")]);

        let outcome = walker(&mock).walk(&[id("a")]).await;

        assert_eq!(names(&outcome.direct), BTreeSet::from(["b".into(), "c".into()]));
        assert_eq!(names(&outcome.indirect), BTreeSet::from(["d".into()]));
        assert_eq!(outcome.indirect[0].depth, 2);
        assert!(outcome.notes.is_empty());
    }

    #[tokio::test]
    async fn cycle_terminates_with_each_node_once() {
        // A -> B -> A
        let mock = MockCatalog::new()
            .with_downstream(&id("a"), vec![edge("b")])
            .with_downstream(&id("b"), vec![edge("a")]);

        let outcome = walker(&mock).walk(&[id("a")]).await;

        assert_eq!(names(&outcome.direct), BTreeSet::from(["b".into()]));
        assert_eq!(names(&outcome.indirect), BTreeSet::from(["a".into()]));
        assert_eq!(outcome.direct.len() + outcome.indirect.len(), 2);
    }

    #[tokio::test]
    async fn direct_classification_takes_priority() {
        // B is reachable at depth 1 (from A) and depth 2 (through C).
        let mock = MockCatalog::new()
            .with_downstream(&id("a"), vec![edge("b"), edge("c")])
            .with_downstream(&id("c"), vec![edge("b")]);

        let outcome = walker(&mock).walk(&[id("a")]).await;

        assert_eq!(names(&outcome.direct), BTreeSet::from(["b".into(), "c".into()]));
        assert!(outcome.indirect.is_empty());
    }

    #[tokio::test]
    async fn diamond_dedupes_across_paths() {
        // A -> [B, C]; both B and C -> D. D appears once.
        let mock = MockCatalog::new()
            .with_downstream(&id("a"), vec![edge("b"), edge("c")])
            .with_downstream(&id("b"), vec![edge("d")])
            .with_downstream(&id("c"), vec![edge("d")]);

        let outcome = walker(&mock).walk(&[id("a")]).await;

        assert_eq!(names(&outcome.indirect), BTreeSet::from(["d".into()]));
        assert_eq!(outcome.indirect.len(), 1);
    }

    #[tokio::test]
    async fn lineage_failure_for_a_seed_yields_empty_sets() {
        let mock = MockCatalog::new()
            .with_downstream(&id("a"), vec![edge("b")])
            .with_failure(&id("a"));

        let outcome = walker(&mock).walk(&[id("a")]).await;

        assert!(outcome.direct.is_empty());
        assert!(outcome.indirect.is_empty());
        assert!(outcome.notes.is_empty());
    }

    #[tokio::test]
    async fn mid_walk_failure_keeps_siblings() {
        // B's lineage fails; C's still expands.
        let mock = MockCatalog::new()
            .with_downstream(&id("a"), vec![edge("b"), edge("c")])
            .with_downstream(&id("b"), vec![edge("x")])
            .with_failure(&id("b"))
            .with_downstream(&id("c"), vec![edge("d")]);

        let outcome = walker(&mock).walk(&[id("a")]).await;

        assert_eq!(names(&outcome.indirect), BTreeSet::from(["d".into()]));
    }

    #[tokio::test]
    async fn idempotent_over_frozen_responses() {
        let mock = MockCatalog::new()
            .with_downstream(&id("a"), vec![edge("b"), edge("c")])
            .with_downstream(&id("b"), vec![edge("d")])
            .with_downstream(&id("d"), vec![edge("b")]);

        let w = walker(&mock);
        let first = w.walk(&[id("a")]).await;
        let second = w.walk(&[id("a")]).await;

        assert_eq!(names(&first.direct), names(&second.direct));
        assert_eq!(names(&first.indirect), names(&second.indirect));
    }

    #[tokio::test]
    async fn no_identity_appears_twice_across_partitions() {
        let mock = MockCatalog::new()
            .with_downstream(&id("a"), vec![edge("b"), edge("c")])
            .with_downstream(&id("b"), vec![edge("c"), edge("d")])
            .with_downstream(&id("c"), vec![edge("d"), edge("b")]);

        let outcome = walker(&mock).walk(&[id("a")]).await;

        let mut seen = BTreeSet::new();
        for record in outcome.direct.iter().chain(outcome.indirect.iter()) {
            assert!(seen.insert(IdentityKey::AssetTriple.of(&record.identity)));
        }
    }

    #[tokio::test]
    async fn depth_ceiling_returns_partial_result_with_note() {
        // Chain a -> b -> c -> d -> e with max_depth 2.
        let mock = MockCatalog::new()
            .with_downstream(&id("a"), vec![edge("b")])
            .with_downstream(&id("b"), vec![edge("c")])
            .with_downstream(&id("c"), vec![edge("d")])
            .with_downstream(&id("d"), vec![edge("e")]);

        let limits = TraversalLimits {
            max_depth: 2,
            max_records: 10_000,
        };
        let w = ImpactWalker::new(&mock, IdentityKey::AssetTriple, limits);
        let outcome = w.walk(&[id("a")]).await;

        assert_eq!(names(&outcome.direct), BTreeSet::from(["b".into()]));
        assert_eq!(names(&outcome.indirect), BTreeSet::from(["c".into()]));
        assert_eq!(
            outcome.notes,
            vec![TraversalNote::DepthLimitReached { depth: 2 }]
        );
    }

    #[tokio::test]
    async fn record_ceiling_returns_partial_result_with_note() {
        let mock = MockCatalog::new()
            .with_downstream(&id("a"), vec![edge("b"), edge("c"), edge("d")]);

        let limits = TraversalLimits {
            max_depth: 50,
            max_records: 2,
        };
        let w = ImpactWalker::new(&mock, IdentityKey::AssetTriple, limits);
        let outcome = w.walk(&[id("a")]).await;

        assert_eq!(outcome.direct.len(), 2);
        assert_eq!(
            outcome.notes,
            vec![TraversalNote::RecordLimitReached { records: 2 }]
        );
    }

    #[tokio::test]
    async fn name_key_collapses_same_entity_across_asset_ids() {
        // The same entity registered under two asset ids: under NameKey
        // the second discovery is a duplicate.
        let b1 = AssetIdentity::new("a-b1", "c-1", "b");
        let b2 = AssetIdentity::new("a-b2", "c-1", "b");
        let edge_for = |target: &AssetIdentity| LineageEdge {
            target: target.clone(),
            name: "b".to_string(),
            connection_name: "warehouse".to_string(),
            flow: FlowDirection::Downstream,
        };

        let mock = MockCatalog::new()
            .with_downstream(&id("a"), vec![edge_for(&b1), edge_for(&b2)]);

        let triple = ImpactWalker::new(&mock, IdentityKey::AssetTriple, TraversalLimits::default());
        let name = ImpactWalker::new(&mock, IdentityKey::NameKey, TraversalLimits::default());

        assert_eq!(triple.walk(&[id("a")]).await.direct.len(), 2);
        assert_eq!(name.walk(&[id("a")]).await.direct.len(), 1);
    }
}
