//! Leader CRUD operations and association management.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use modmaker_domain::{
    Civilization, CivilizationId, Description, Flaw, FlawId, Leader, LeaderColumn, LeaderId,
    LeaderName, ListQuery, NewLeader, Page, Trait, TraitId,
};

use crate::infrastructure::ports::{CivilizationRepo, FlawRepo, LeaderRepo, TraitRepo};

use super::ManagementError;

/// A leader with its references resolved for display. Traits and flaws are
/// sorted by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderView {
    pub leader: Leader,
    pub civilization: Option<Civilization>,
    pub traits: Vec<Trait>,
    pub flaws: Vec<Flaw>,
}

/// Partial leader update. `None` keeps the current value; `traits` and
/// `flaws` replace the whole set when present.
#[derive(Debug, Clone, Default)]
pub struct LeaderChanges {
    pub name: Option<String>,
    /// Blank clears.
    pub description: Option<String>,
    /// `Some(None)` detaches the leader from its civilization.
    pub civilization_id: Option<Option<CivilizationId>>,
    pub traits: Option<Vec<TraitId>>,
    pub flaws: Option<Vec<FlawId>>,
}

pub struct LeaderCrud {
    leaders: Arc<dyn LeaderRepo>,
    civilizations: Arc<dyn CivilizationRepo>,
    traits: Arc<dyn TraitRepo>,
    flaws: Arc<dyn FlawRepo>,
}

impl LeaderCrud {
    pub fn new(
        leaders: Arc<dyn LeaderRepo>,
        civilizations: Arc<dyn CivilizationRepo>,
        traits: Arc<dyn TraitRepo>,
        flaws: Arc<dyn FlawRepo>,
    ) -> Self {
        Self {
            leaders,
            civilizations,
            traits,
            flaws,
        }
    }

    pub async fn list(
        &self,
        query: &ListQuery<LeaderColumn>,
    ) -> Result<Page<LeaderView>, ManagementError> {
        let Page {
            items,
            total,
            page,
            page_size,
        } = self.leaders.list(query).await?;
        Ok(Page {
            items: self.resolve(items).await?,
            total,
            page,
            page_size,
        })
    }

    pub async fn get(&self, id: LeaderId) -> Result<Option<LeaderView>, ManagementError> {
        let Some(leader) = self.leaders.get(id).await? else {
            return Ok(None);
        };
        Ok(self.resolve(vec![leader]).await?.pop())
    }

    pub async fn create(
        &self,
        name: String,
        description: Option<String>,
        civilization_id: Option<CivilizationId>,
        traits: Vec<TraitId>,
        flaws: Vec<FlawId>,
    ) -> Result<LeaderView, ManagementError> {
        let mut leader = NewLeader::new(LeaderName::new(name)?);
        if let Some(description) = Description::optional(description)? {
            leader = leader.with_description(description);
        }
        if let Some(civilization_id) = civilization_id {
            self.require_civilization(civilization_id).await?;
            leader = leader.in_civilization(civilization_id);
        }
        self.require_traits(&traits).await?;
        self.require_flaws(&flaws).await?;
        let leader = leader.with_traits(traits).with_flaws(flaws);

        let created = self.leaders.insert(&leader).await?;
        tracing::info!(leader_id = %created.id, name = %created.name, "Leader created");
        self.view(created).await
    }

    pub async fn update(
        &self,
        id: LeaderId,
        changes: LeaderChanges,
    ) -> Result<LeaderView, ManagementError> {
        let mut leader = self.leaders.get(id).await?.ok_or(ManagementError::NotFound)?;

        if let Some(name) = changes.name {
            leader.name = LeaderName::new(name)?;
        }
        if let Some(description) = changes.description {
            leader.description = Description::optional(Some(description))?;
        }
        if let Some(civilization_id) = changes.civilization_id {
            if let Some(civilization_id) = civilization_id {
                self.require_civilization(civilization_id).await?;
            }
            leader.civilization_id = civilization_id;
        }
        if let Some(traits) = changes.traits {
            self.require_traits(&traits).await?;
            leader.traits = traits.into_iter().collect();
        }
        if let Some(flaws) = changes.flaws {
            self.require_flaws(&flaws).await?;
            leader.flaws = flaws.into_iter().collect();
        }

        self.leaders.update(&leader).await?;
        self.view(leader).await
    }

    pub async fn delete(&self, id: LeaderId) -> Result<(), ManagementError> {
        self.leaders.delete(id).await?;
        tracing::info!(leader_id = %id, "Leader deleted");
        Ok(())
    }

    /// Returns whether the trait was newly associated.
    pub async fn add_trait(
        &self,
        id: LeaderId,
        trait_id: TraitId,
    ) -> Result<bool, ManagementError> {
        self.require_leader(id).await?;
        self.traits
            .get(trait_id)
            .await?
            .ok_or(ManagementError::NotFound)?;
        Ok(self.leaders.add_trait(id, trait_id).await?)
    }

    /// Returns whether the trait was associated before.
    pub async fn remove_trait(
        &self,
        id: LeaderId,
        trait_id: TraitId,
    ) -> Result<bool, ManagementError> {
        self.require_leader(id).await?;
        Ok(self.leaders.remove_trait(id, trait_id).await?)
    }

    /// Returns whether the flaw was newly associated.
    pub async fn add_flaw(&self, id: LeaderId, flaw_id: FlawId) -> Result<bool, ManagementError> {
        self.require_leader(id).await?;
        self.flaws
            .get(flaw_id)
            .await?
            .ok_or(ManagementError::NotFound)?;
        Ok(self.leaders.add_flaw(id, flaw_id).await?)
    }

    /// Returns whether the flaw was associated before.
    pub async fn remove_flaw(
        &self,
        id: LeaderId,
        flaw_id: FlawId,
    ) -> Result<bool, ManagementError> {
        self.require_leader(id).await?;
        Ok(self.leaders.remove_flaw(id, flaw_id).await?)
    }

    async fn require_leader(&self, id: LeaderId) -> Result<(), ManagementError> {
        self.leaders
            .get(id)
            .await?
            .map(|_| ())
            .ok_or(ManagementError::NotFound)
    }

    async fn require_civilization(&self, id: CivilizationId) -> Result<(), ManagementError> {
        match self.civilizations.get(id).await? {
            Some(_) => Ok(()),
            None => Err(ManagementError::InvalidInput(format!(
                "Civilization {} does not exist",
                id
            ))),
        }
    }

    async fn require_traits(&self, ids: &[TraitId]) -> Result<(), ManagementError> {
        let wanted: BTreeSet<TraitId> = ids.iter().copied().collect();
        if wanted.is_empty() {
            return Ok(());
        }
        let found: BTreeSet<TraitId> = self
            .traits
            .get_many(&wanted.iter().copied().collect::<Vec<_>>())
            .await?
            .into_iter()
            .map(|t| t.id)
            .collect();
        missing_ids("Trait", &wanted, &found)
    }

    async fn require_flaws(&self, ids: &[FlawId]) -> Result<(), ManagementError> {
        let wanted: BTreeSet<FlawId> = ids.iter().copied().collect();
        if wanted.is_empty() {
            return Ok(());
        }
        let found: BTreeSet<FlawId> = self
            .flaws
            .get_many(&wanted.iter().copied().collect::<Vec<_>>())
            .await?
            .into_iter()
            .map(|f| f.id)
            .collect();
        missing_ids("Flaw", &wanted, &found)
    }

    async fn view(&self, leader: Leader) -> Result<LeaderView, ManagementError> {
        self.resolve(vec![leader])
            .await?
            .pop()
            .ok_or(ManagementError::NotFound)
    }

    /// Resolve references for a batch of leaders with one lookup per
    /// civilization and one per tag table.
    async fn resolve(&self, leaders: Vec<Leader>) -> Result<Vec<LeaderView>, ManagementError> {
        let civilization_ids: BTreeSet<CivilizationId> =
            leaders.iter().filter_map(|l| l.civilization_id).collect();
        let mut civilizations: HashMap<CivilizationId, Civilization> = HashMap::new();
        for id in civilization_ids {
            if let Some(civilization) = self.civilizations.get(id).await? {
                civilizations.insert(id, civilization);
            }
        }

        let trait_ids: Vec<TraitId> = leaders
            .iter()
            .flat_map(|l| l.traits.iter().copied())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let traits: HashMap<TraitId, Trait> = if trait_ids.is_empty() {
            HashMap::new()
        } else {
            self.traits
                .get_many(&trait_ids)
                .await?
                .into_iter()
                .map(|t| (t.id, t))
                .collect()
        };

        let flaw_ids: Vec<FlawId> = leaders
            .iter()
            .flat_map(|l| l.flaws.iter().copied())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let flaws: HashMap<FlawId, Flaw> = if flaw_ids.is_empty() {
            HashMap::new()
        } else {
            self.flaws
                .get_many(&flaw_ids)
                .await?
                .into_iter()
                .map(|f| (f.id, f))
                .collect()
        };

        Ok(leaders
            .into_iter()
            .map(|leader| {
                let mut leader_traits: Vec<Trait> = leader
                    .traits
                    .iter()
                    .filter_map(|id| traits.get(id).cloned())
                    .collect();
                leader_traits.sort_by_key(|t| t.name.as_str().to_lowercase());

                let mut leader_flaws: Vec<Flaw> = leader
                    .flaws
                    .iter()
                    .filter_map(|id| flaws.get(id).cloned())
                    .collect();
                leader_flaws.sort_by_key(|f| f.name.as_str().to_lowercase());

                LeaderView {
                    civilization: leader
                        .civilization_id
                        .and_then(|id| civilizations.get(&id).cloned()),
                    traits: leader_traits,
                    flaws: leader_flaws,
                    leader,
                }
            })
            .collect())
    }
}

fn missing_ids<T: Ord + Copy + std::fmt::Display>(
    entity: &str,
    wanted: &BTreeSet<T>,
    found: &BTreeSet<T>,
) -> Result<(), ManagementError> {
    let missing: Vec<String> = wanted.difference(found).map(|id| id.to_string()).collect();
    if missing.is_empty() {
        return Ok(());
    }
    Err(ManagementError::InvalidInput(format!(
        "{} ids do not exist: {}",
        entity,
        missing.join(", ")
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{
        MockCivilizationRepo, MockFlawRepo, MockLeaderRepo, MockTraitRepo,
    };
    use modmaker_domain::{CivilizationName, FlawName, NewCivilization, TraitName};

    fn augustus() -> Leader {
        NewLeader::new(LeaderName::new("Augustus").unwrap()).into_leader(LeaderId::new(1))
    }

    fn named_trait(id: i64, name: &str) -> Trait {
        Trait::new(TraitId::new(id), TraitName::new(name).unwrap())
    }

    struct Mocks {
        leaders: MockLeaderRepo,
        civilizations: MockCivilizationRepo,
        traits: MockTraitRepo,
        flaws: MockFlawRepo,
    }

    impl Mocks {
        fn new() -> Self {
            Self {
                leaders: MockLeaderRepo::new(),
                civilizations: MockCivilizationRepo::new(),
                traits: MockTraitRepo::new(),
                flaws: MockFlawRepo::new(),
            }
        }

        fn crud(self) -> LeaderCrud {
            LeaderCrud::new(
                Arc::new(self.leaders),
                Arc::new(self.civilizations),
                Arc::new(self.traits),
                Arc::new(self.flaws),
            )
        }
    }

    #[tokio::test]
    async fn create_without_civilization_is_allowed() {
        let mut mocks = Mocks::new();
        mocks
            .leaders
            .expect_insert()
            .withf(|new| new.civilization_id.is_none())
            .returning(|new| Ok(new.clone().into_leader(LeaderId::new(7))));

        let view = mocks
            .crud()
            .create("Gandhi".to_string(), None, None, vec![], vec![])
            .await
            .expect("created");
        assert_eq!(view.leader.id, LeaderId::new(7));
        assert_eq!(view.civilization, None);
    }

    #[tokio::test]
    async fn create_with_unknown_trait_is_invalid_input() {
        let mut mocks = Mocks::new();
        mocks
            .traits
            .expect_get_many()
            .returning(|_| Ok(vec![named_trait(1, "Strategic")]));

        let result = mocks
            .crud()
            .create(
                "Augustus".to_string(),
                None,
                None,
                vec![TraitId::new(1), TraitId::new(2)],
                vec![],
            )
            .await;
        match result {
            Err(ManagementError::InvalidInput(message)) => {
                assert_eq!(message, "Trait ids do not exist: 2")
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[tokio::test]
    async fn create_with_unknown_civilization_is_invalid_input() {
        let mut mocks = Mocks::new();
        mocks.civilizations.expect_get().returning(|_| Ok(None));

        let result = mocks
            .crud()
            .create(
                "Augustus".to_string(),
                None,
                Some(CivilizationId::new(4)),
                vec![],
                vec![],
            )
            .await;
        assert!(matches!(result, Err(ManagementError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn get_resolves_civilization_and_sorted_names() {
        let mut mocks = Mocks::new();
        mocks.leaders.expect_get().returning(|_| {
            let mut leader = augustus();
            leader.civilization_id = Some(CivilizationId::new(3));
            leader.add_trait(TraitId::new(1));
            leader.add_trait(TraitId::new(2));
            Ok(Some(leader))
        });
        mocks.civilizations.expect_get().returning(|id| {
            Ok(Some(
                NewCivilization::new(CivilizationName::new("Rome").unwrap()).into_civilization(id),
            ))
        });
        mocks.traits.expect_get_many().returning(|_| {
            Ok(vec![named_trait(1, "strategic"), named_trait(2, "Builder")])
        });

        let view = mocks
            .crud()
            .get(LeaderId::new(1))
            .await
            .expect("get")
            .expect("exists");
        assert_eq!(
            view.civilization.map(|c| c.name.to_string()),
            Some("Rome".to_string())
        );
        let names: Vec<_> = view.traits.iter().map(|t| t.to_string()).collect();
        assert_eq!(names, vec!["Builder", "strategic"]);
        assert!(view.flaws.is_empty());
    }

    #[tokio::test]
    async fn update_detaches_civilization_and_replaces_flaws() {
        let mut mocks = Mocks::new();
        mocks.leaders.expect_get().returning(|_| {
            let mut leader = augustus();
            leader.civilization_id = Some(CivilizationId::new(3));
            leader.add_flaw(FlawId::new(8));
            Ok(Some(leader))
        });
        mocks.flaws.expect_get_many().returning(|ids| {
            Ok(ids
                .iter()
                .map(|id| Flaw::new(*id, FlawName::new(format!("Flaw {}", id)).unwrap()))
                .collect())
        });
        mocks
            .leaders
            .expect_update()
            .withf(|leader| {
                leader.civilization_id.is_none()
                    && leader.flaws.iter().copied().collect::<Vec<_>>() == vec![FlawId::new(9)]
            })
            .times(1)
            .returning(|_| Ok(()));

        let view = mocks
            .crud()
            .update(
                LeaderId::new(1),
                LeaderChanges {
                    civilization_id: Some(None),
                    flaws: Some(vec![FlawId::new(9)]),
                    ..Default::default()
                },
            )
            .await
            .expect("updated");
        assert_eq!(view.flaws.len(), 1);
        assert_eq!(view.civilization, None);
    }

    #[tokio::test]
    async fn adding_trait_to_missing_leader_is_not_found() {
        let mut mocks = Mocks::new();
        mocks.leaders.expect_get().returning(|_| Ok(None));

        let result = mocks
            .crud()
            .add_trait(LeaderId::new(1), TraitId::new(1))
            .await;
        assert!(matches!(result, Err(ManagementError::NotFound)));
    }

    #[tokio::test]
    async fn adding_a_held_trait_reports_no_change() {
        let mut mocks = Mocks::new();
        mocks.leaders.expect_get().returning(|_| Ok(Some(augustus())));
        mocks
            .traits
            .expect_get()
            .returning(|id| Ok(Some(named_trait(id.as_i64(), "Strategic"))));
        mocks.leaders.expect_add_trait().returning(|_, _| Ok(false));

        let changed = mocks
            .crud()
            .add_trait(LeaderId::new(1), TraitId::new(1))
            .await
            .expect("added");
        assert!(!changed);
    }
}
