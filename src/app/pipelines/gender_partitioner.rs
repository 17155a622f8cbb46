use crate::domain::model::{
    CollisionPolicy, CorpusIndex, PartitionPlan, RawImageRecord, ReferenceLabels, Role,
    WorkspaceLayout,
};
use crate::config::MIN_TEST_INTERVAL;
use crate::domain::ports::Partitioner;
use crate::utils::error::{Result, StageError};
use crate::utils::validation::validate_positive_number;
use std::collections::HashMap;
use std::path::PathBuf;

/// Splits the flat view into `genders/{train,test}/{male,female}`.
///
/// Every `test_interval`-th image in scan order is held out for test. The position
/// counter advances for unlabeled images too, so a skip shifts the boundary for the
/// images after it.
pub struct GenderPartitioner<'a> {
    labels: &'a ReferenceLabels,
    test_interval: usize,
    collision: CollisionPolicy,
}

impl<'a> GenderPartitioner<'a> {
    pub fn new(labels: &'a ReferenceLabels, test_interval: usize, collision: CollisionPolicy) -> Self {
        Self {
            labels,
            test_interval,
            collision,
        }
    }

    fn role_at(&self, position: usize) -> Role {
        if position % self.test_interval == 0 {
            Role::Test
        } else {
            Role::Train
        }
    }

    pub fn plan_records(
        &self,
        records: &[RawImageRecord],
        layout: &WorkspaceLayout,
    ) -> Result<PartitionPlan> {
        validate_positive_number("split.test_interval", self.test_interval, MIN_TEST_INTERVAL)?;

        let mut plan = PartitionPlan::default();
        let mut claimed: HashMap<PathBuf, PathBuf> = HashMap::new();

        for (index, record) in records.iter().enumerate() {
            let role = self.role_at(index + 1);

            let Some(gender) = self.labels.resolve(&record.file_name) else {
                tracing::info!("File: {} not in female or male list", record.file_name);
                plan.skipped.push(record.clone());
                continue;
            };

            let dir = layout.gender_dir(role, gender);
            let mut destination = dir.join(&record.file_name);

            if let Some(first) = claimed.get(&destination) {
                match self.collision {
                    CollisionPolicy::Fail => {
                        return Err(StageError::DestinationCollision {
                            destination,
                            first: first.clone(),
                            second: record.source_path.clone(),
                        });
                    }
                    CollisionPolicy::Overwrite => {
                        tracing::warn!(
                            "Overwriting {} ({} replaces {})",
                            destination.display(),
                            record.source_path.display(),
                            first.display()
                        );
                    }
                    CollisionPolicy::Qualify => {
                        destination = qualified_destination(&dir, record, &claimed);
                        tracing::info!(
                            "Renamed colliding {} to {}",
                            record.source_path.display(),
                            destination.display()
                        );
                    }
                }
            }

            claimed.insert(destination.clone(), record.source_path.clone());
            plan.copy(record.source_path.clone(), destination, role);
        }

        Ok(plan)
    }
}

fn qualified_destination(
    dir: &std::path::Path,
    record: &RawImageRecord,
    claimed: &HashMap<PathBuf, PathBuf>,
) -> PathBuf {
    let prefix = record.identity.as_deref().unwrap_or("root");
    let mut candidate = dir.join(format!("{}_{}", prefix, record.file_name));
    let mut suffix = 2;
    while claimed.contains_key(&candidate) {
        candidate = dir.join(format!("{}_{}_{}", prefix, suffix, record.file_name));
        suffix += 1;
    }
    candidate
}

impl Partitioner for GenderPartitioner<'_> {
    fn phase(&self) -> &'static str {
        "gender"
    }

    fn plan(&self, corpus: &CorpusIndex, layout: &WorkspaceLayout) -> Result<PartitionPlan> {
        self.plan_records(&corpus.records, layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Gender;

    fn record(identity: &str, file_name: &str) -> RawImageRecord {
        RawImageRecord {
            file_name: file_name.to_string(),
            source_path: PathBuf::from(format!("persons/{}/{}", identity, file_name)),
            identity: Some(identity.to_string()),
        }
    }

    fn labels(male: &[&str], female: &[&str]) -> ReferenceLabels {
        ReferenceLabels::new(
            male.iter().map(|s| s.to_string()).collect(),
            female.iter().map(|s| s.to_string()).collect(),
        )
    }

    #[test]
    fn test_every_tenth_position_is_test() {
        let names: Vec<String> = (1..=20).map(|i| format!("img_{:02}.jpg", i)).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let labels = labels(&refs, &[]);
        let records: Vec<_> = names.iter().map(|n| record("p", n)).collect();
        let layout = WorkspaceLayout::new("tmp");

        let plan = GenderPartitioner::new(&labels, 10, CollisionPolicy::Fail)
            .plan_records(&records, &layout)
            .unwrap();

        let test: Vec<_> = plan
            .placements()
            .filter(|p| p.role == Role::Test)
            .map(|p| p.destination.clone())
            .collect();
        assert_eq!(
            test,
            vec![
                layout.gender_dir(Role::Test, Gender::Male).join("img_10.jpg"),
                layout.gender_dir(Role::Test, Gender::Male).join("img_20.jpg"),
            ]
        );
        assert_eq!(plan.count(Role::Train), 18);
    }

    #[test]
    fn test_unlabeled_image_consumes_a_position() {
        let labels = labels(&["m1.jpg", "m2.jpg", "m3.jpg"], &["f1.jpg"]);
        let records = vec![
            record("a", "m1.jpg"),
            record("a", "unknown.jpg"),
            record("b", "f1.jpg"),
            record("c", "m2.jpg"),
            record("c", "m3.jpg"),
        ];
        let layout = WorkspaceLayout::new("tmp");

        let plan = GenderPartitioner::new(&labels, 2, CollisionPolicy::Fail)
            .plan_records(&records, &layout)
            .unwrap();

        assert_eq!(plan.skipped.len(), 1);
        assert_eq!(plan.skipped[0].file_name, "unknown.jpg");
        let roles: Vec<_> = plan
            .placements()
            .map(|p| (p.destination.file_name().unwrap().to_str().unwrap(), p.role))
            .collect();
        assert_eq!(
            roles,
            vec![
                ("m1.jpg", Role::Train),
                ("f1.jpg", Role::Train),
                ("m2.jpg", Role::Test),
                ("m3.jpg", Role::Train),
            ]
        );
    }

    #[test]
    fn test_interval_below_two_is_rejected() {
        let labels = labels(&["a.jpg"], &[]);
        let records = vec![record("p", "a.jpg")];

        for interval in [0, 1] {
            let err = GenderPartitioner::new(&labels, interval, CollisionPolicy::Fail)
                .plan_records(&records, &WorkspaceLayout::new("tmp"))
                .unwrap_err();
            assert!(matches!(err, StageError::InvalidConfigValue { ref field, .. } if field == "split.test_interval"));
        }
    }

    #[test]
    fn test_collision_fails_by_default() {
        let labels = labels(&["same.jpg"], &[]);
        let records = vec![record("a", "same.jpg"), record("b", "same.jpg")];

        let err = GenderPartitioner::new(&labels, 10, CollisionPolicy::Fail)
            .plan_records(&records, &WorkspaceLayout::new("tmp"))
            .unwrap_err();

        assert!(matches!(err, StageError::DestinationCollision { .. }));
    }

    #[test]
    fn test_collision_overwrite_keeps_both_copies_in_order() {
        let labels = labels(&["same.jpg"], &[]);
        let records = vec![record("a", "same.jpg"), record("b", "same.jpg")];

        let plan = GenderPartitioner::new(&labels, 10, CollisionPolicy::Overwrite)
            .plan_records(&records, &WorkspaceLayout::new("tmp"))
            .unwrap();

        let placements: Vec<_> = plan.placements().collect();
        assert_eq!(placements.len(), 2);
        assert_eq!(placements[0].destination, placements[1].destination);
        assert_eq!(placements[1].source, PathBuf::from("persons/b/same.jpg"));
    }

    #[test]
    fn test_collision_qualify_renames_later_copies() {
        let labels = labels(&["same.jpg"], &[]);
        let records = vec![
            record("a", "same.jpg"),
            record("b", "same.jpg"),
            record("b", "same.jpg"),
        ];
        let layout = WorkspaceLayout::new("tmp");
        let dir = layout.gender_dir(Role::Train, Gender::Male);

        let plan = GenderPartitioner::new(&labels, 10, CollisionPolicy::Qualify)
            .plan_records(&records, &layout)
            .unwrap();

        let destinations: Vec<_> = plan.placements().map(|p| p.destination.clone()).collect();
        assert_eq!(
            destinations,
            vec![
                dir.join("same.jpg"),
                dir.join("b_same.jpg"),
                dir.join("b_2_same.jpg"),
            ]
        );
    }

    #[test]
    fn test_same_name_in_different_roles_does_not_collide() {
        let labels = labels(&["same.jpg", "x.jpg"], &[]);
        let records = vec![record("a", "same.jpg"), record("a", "x.jpg"), record("b", "same.jpg")];

        let plan = GenderPartitioner::new(&labels, 3, CollisionPolicy::Fail)
            .plan_records(&records, &WorkspaceLayout::new("tmp"))
            .unwrap();

        assert_eq!(plan.count(Role::Train), 2);
        assert_eq!(plan.count(Role::Test), 1);
    }
}
