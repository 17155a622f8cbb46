use crate::domain::model::{CorpusIndex, IdentityGroup, PartitionPlan, Role, WorkspaceLayout};
use crate::domain::ports::Partitioner;
use crate::utils::error::Result;

/// Splits the grouped view into `individuals/{train,test}/<identity>`.
///
/// The first image of an identity with more than one image is held out for test; a
/// singleton goes to train and leaves its test folder empty.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityPartitioner;

impl IdentityPartitioner {
    pub fn new() -> Self {
        Self
    }

    pub fn plan_groups(&self, groups: &[IdentityGroup], layout: &WorkspaceLayout) -> PartitionPlan {
        let mut plan = PartitionPlan::default();

        for group in groups {
            let test_dir = layout.identity_dir(Role::Test, &group.identity);
            let train_dir = layout.identity_dir(Role::Train, &group.identity);
            plan.create_dir(test_dir.clone());
            plan.create_dir(train_dir.clone());

            let train_images = match group.images.split_first() {
                Some((held_out, rest)) if !rest.is_empty() => {
                    if let Some(name) = held_out.file_name() {
                        plan.copy(held_out.clone(), test_dir.join(name), Role::Test);
                    }
                    rest
                }
                _ => group.images.as_slice(),
            };

            for image in train_images {
                if let Some(name) = image.file_name() {
                    plan.copy(image.clone(), train_dir.join(name), Role::Train);
                }
            }
        }

        plan
    }
}

impl Partitioner for IdentityPartitioner {
    fn phase(&self) -> &'static str {
        "individual"
    }

    fn plan(&self, corpus: &CorpusIndex, layout: &WorkspaceLayout) -> Result<PartitionPlan> {
        Ok(self.plan_groups(&corpus.identities, layout))
    }
}
