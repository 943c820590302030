use modmaker_domain::{
    Civilization, CivilizationColumn, CivilizationDeletePolicy, CivilizationName, Description,
    FilterOp, FlawName, Leader, LeaderColumn, LeaderName, ListQuery, NewCivilization, NewLeader,
    SortOrder, TagColumn, TraitName,
};

use super::{connect, ensure_schema, SqliteRepositories};
use crate::infrastructure::ports::{
    CivilizationRepo, FlawRepo, LeaderRepo, RepoError, TraitRepo,
};

struct TestDb {
    _dir: tempfile::TempDir,
    repos: SqliteRepositories,
}

async fn test_db() -> TestDb {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("modmaker.db");
    let pool = connect(&path.to_string_lossy()).await.expect("connect");
    ensure_schema(&pool).await.expect("schema");
    TestDb {
        _dir: dir,
        repos: SqliteRepositories::new(pool),
    }
}

fn civ(name: &str) -> NewCivilization {
    NewCivilization::new(CivilizationName::new(name).expect("civ name"))
}

fn leader(name: &str) -> NewLeader {
    NewLeader::new(LeaderName::new(name).expect("leader name"))
}

fn trait_name(name: &str) -> TraitName {
    TraitName::new(name).expect("trait name")
}

fn flaw_name(name: &str) -> FlawName {
    FlawName::new(name).expect("flaw name")
}

#[tokio::test]
async fn ensure_schema_is_idempotent() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("twice.db");
    let pool = connect(&path.to_string_lossy()).await.expect("connect");
    ensure_schema(&pool).await.expect("first");
    ensure_schema(&pool).await.expect("second");
}

#[tokio::test]
async fn duplicate_civilization_name_is_a_unique_violation() {
    let db = test_db().await;
    db.repos
        .civilization
        .insert(&civ("Rome"))
        .await
        .expect("first insert");

    let err = db
        .repos
        .civilization
        .insert(&civ("Rome"))
        .await
        .expect_err("second insert must fail");

    match err {
        RepoError::UniqueViolation {
            entity_type,
            field,
            value,
        } => {
            assert_eq!(entity_type, "Civilization");
            assert_eq!(field, "name");
            assert_eq!(value, "Rome");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn duplicate_leader_name_is_a_unique_violation() {
    let db = test_db().await;
    db.repos.leader.insert(&leader("Cleopatra")).await.expect("insert");
    let err = db
        .repos
        .leader
        .insert(&leader("Cleopatra"))
        .await
        .expect_err("duplicate");
    assert!(err.is_unique_violation());
}

#[tokio::test]
async fn renaming_a_trait_onto_an_existing_name_fails() {
    let db = test_db().await;
    db.repos.traits.insert(&trait_name("Strategic")).await.expect("insert");
    let mut other = db.repos.traits.insert(&trait_name("Cunning")).await.expect("insert");

    other.name = trait_name("Strategic");
    let err = db.repos.traits.rename(&other).await.expect_err("duplicate");
    assert!(err.is_unique_violation());
}

#[tokio::test]
async fn duplicate_flaw_name_is_a_unique_violation() {
    let db = test_db().await;
    db.repos.flaws.insert(&flaw_name("Paranoid")).await.expect("insert");

    let err = db
        .repos
        .flaws
        .insert(&flaw_name("Paranoid"))
        .await
        .expect_err("duplicate");
    match err {
        RepoError::UniqueViolation {
            entity_type, value, ..
        } => {
            assert_eq!(entity_type, "Flaw");
            assert_eq!(value, "Paranoid");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn leader_without_civilization_reads_back_without_one() {
    let db = test_db().await;
    let created = db.repos.leader.insert(&leader("Gandhi")).await.expect("insert");

    let loaded = db
        .repos
        .leader
        .get(created.id)
        .await
        .expect("get")
        .expect("leader exists");
    assert_eq!(loaded.civilization_id, None);
    assert!(loaded.traits.is_empty());
    assert!(loaded.flaws.is_empty());
}

#[tokio::test]
async fn adding_a_trait_twice_keeps_one_association() {
    let db = test_db().await;
    let augustus = db.repos.leader.insert(&leader("Augustus")).await.expect("leader");
    let strategic = db.repos.traits.insert(&trait_name("Strategic")).await.expect("trait");

    assert!(db.repos.leader.add_trait(augustus.id, strategic.id).await.expect("add"));
    assert!(!db.repos.leader.add_trait(augustus.id, strategic.id).await.expect("add again"));

    let loaded = db
        .repos
        .leader
        .get(augustus.id)
        .await
        .expect("get")
        .expect("exists");
    assert_eq!(loaded.traits.len(), 1);
    assert!(loaded.traits.contains(&strategic.id));
}

#[tokio::test]
async fn removing_associations_reports_change() {
    let db = test_db().await;
    let flaw = db.repos.flaws.insert(&flaw_name("Paranoid")).await.expect("flaw");
    let tamar = db
        .repos
        .leader
        .insert(&leader("Tamar").with_flaws([flaw.id]))
        .await
        .expect("leader");

    assert!(db.repos.leader.remove_flaw(tamar.id, flaw.id).await.expect("remove"));
    assert!(!db.repos.leader.remove_flaw(tamar.id, flaw.id).await.expect("remove again"));
}

#[tokio::test]
async fn adding_a_flaw_twice_keeps_one_association() {
    let db = test_db().await;
    let nero = db.repos.leader.insert(&leader("Nero")).await.expect("leader");
    let vain = db.repos.flaws.insert(&flaw_name("Vain")).await.expect("flaw");

    assert!(db.repos.leader.add_flaw(nero.id, vain.id).await.expect("add"));
    assert!(!db.repos.leader.add_flaw(nero.id, vain.id).await.expect("add again"));

    let loaded = db
        .repos
        .leader
        .get(nero.id)
        .await
        .expect("get")
        .expect("exists");
    assert_eq!(loaded.flaws.into_iter().collect::<Vec<_>>(), vec![vain.id]);
}

#[tokio::test]
async fn deleting_an_unreferenced_trait_removes_it() {
    let db = test_db().await;
    let lonely = db.repos.traits.insert(&trait_name("Lonely")).await.expect("trait");

    db.repos.traits.delete(lonely.id).await.expect("delete");

    assert!(db.repos.traits.get(lonely.id).await.expect("get").is_none());
    let err = db.repos.traits.delete(lonely.id).await.expect_err("already gone");
    assert!(err.is_not_found());
}

#[tokio::test]
async fn deleting_a_referenced_trait_drops_the_association() {
    let db = test_db().await;
    let brave = db.repos.traits.insert(&trait_name("Brave")).await.expect("trait");
    let wise = db.repos.traits.insert(&trait_name("Wise")).await.expect("trait");
    let saladin = db
        .repos
        .leader
        .insert(&leader("Saladin").with_traits([brave.id, wise.id]))
        .await
        .expect("leader");

    db.repos.traits.delete(brave.id).await.expect("delete");

    let loaded = db
        .repos
        .leader
        .get(saladin.id)
        .await
        .expect("get")
        .expect("exists");
    assert_eq!(loaded.traits.into_iter().collect::<Vec<_>>(), vec![wise.id]);
}

#[tokio::test]
async fn deleting_a_referenced_flaw_drops_the_association() {
    let db = test_db().await;
    let greedy = db.repos.flaws.insert(&flaw_name("Greedy")).await.expect("flaw");
    let rash = db.repos.flaws.insert(&flaw_name("Rash")).await.expect("flaw");
    let caligula = db
        .repos
        .leader
        .insert(&leader("Caligula").with_flaws([greedy.id, rash.id]))
        .await
        .expect("leader");

    db.repos.flaws.delete(greedy.id).await.expect("delete");

    assert!(db.repos.flaws.get(greedy.id).await.expect("get").is_none());
    let loaded = db
        .repos
        .leader
        .get(caligula.id)
        .await
        .expect("get")
        .expect("leader survives");
    assert_eq!(loaded.flaws.into_iter().collect::<Vec<_>>(), vec![rash.id]);
}

#[tokio::test]
async fn rome_augustus_scenario() {
    let db = test_db().await;
    let rome = db
        .repos
        .civilization
        .insert(
            &civ("Rome").with_description(Description::new("The Roman Empire").expect("desc")),
        )
        .await
        .expect("civ");
    let augustus = db
        .repos
        .leader
        .insert(&leader("Augustus").in_civilization(rome.id))
        .await
        .expect("leader");
    let strategic = db.repos.traits.insert(&trait_name("Strategic")).await.expect("trait");
    db.repos
        .leader
        .add_trait(augustus.id, strategic.id)
        .await
        .expect("associate");

    let loaded = db
        .repos
        .leader
        .get(augustus.id)
        .await
        .expect("get")
        .expect("exists");
    let trait_ids: Vec<_> = loaded.traits.iter().copied().collect();
    let names: Vec<String> = db
        .repos
        .traits
        .get_many(&trait_ids)
        .await
        .expect("traits")
        .into_iter()
        .map(|t| t.to_string())
        .collect();
    assert_eq!(names, vec!["Strategic".to_string()]);

    let civilization_id = loaded.civilization_id.expect("has civilization");
    let civilization = db
        .repos
        .civilization
        .get(civilization_id)
        .await
        .expect("get civ")
        .expect("civ exists");
    assert_eq!(civilization.name.as_str(), "Rome");
}

#[tokio::test]
async fn update_replaces_association_sets() {
    let db = test_db().await;
    let a = db.repos.traits.insert(&trait_name("Ambitious")).await.expect("trait");
    let b = db.repos.traits.insert(&trait_name("Builder")).await.expect("trait");
    let mut qin = db
        .repos
        .leader
        .insert(&leader("Qin Shi Huang").with_traits([a.id]))
        .await
        .expect("leader");

    qin.remove_trait(a.id);
    qin.add_trait(b.id);
    qin.description = Some(Description::new("First emperor").expect("desc"));
    db.repos.leader.update(&qin).await.expect("update");

    let loaded = db
        .repos
        .leader
        .get(qin.id)
        .await
        .expect("get")
        .expect("exists");
    assert_eq!(loaded, qin);
}

async fn civilization_with_leader(db: &TestDb) -> (Civilization, Leader) {
    let egypt = db.repos.civilization.insert(&civ("Egypt")).await.expect("civ");
    let strategic = db.repos.traits.insert(&trait_name("Strategic")).await.expect("trait");
    let ramesses = db
        .repos
        .leader
        .insert(
            &leader("Ramesses II")
                .in_civilization(egypt.id)
                .with_traits([strategic.id]),
        )
        .await
        .expect("leader");
    (egypt, ramesses)
}

#[tokio::test]
async fn restrict_policy_refuses_delete_while_referenced() {
    let db = test_db().await;
    let (egypt, ramesses) = civilization_with_leader(&db).await;

    let err = db
        .repos
        .civilization
        .delete(egypt.id, CivilizationDeletePolicy::Restrict)
        .await
        .expect_err("restricted");
    assert!(matches!(err, RepoError::ConstraintViolation(_)));
    assert!(err.to_string().contains("Egypt"));

    assert!(db.repos.civilization.get(egypt.id).await.expect("get").is_some());
    assert!(db.repos.leader.get(ramesses.id).await.expect("get").is_some());
}

#[tokio::test]
async fn cascade_policy_deletes_leaders_too() {
    let db = test_db().await;
    let (egypt, ramesses) = civilization_with_leader(&db).await;

    db.repos
        .civilization
        .delete(egypt.id, CivilizationDeletePolicy::Cascade)
        .await
        .expect("delete");

    assert!(db.repos.civilization.get(egypt.id).await.expect("get").is_none());
    assert!(db.repos.leader.get(ramesses.id).await.expect("get").is_none());
    // The shared trait outlives the leader that held it.
    let traits = db.repos.traits.list(&ListQuery::new()).await.expect("list");
    assert_eq!(traits.total, 1);
}

#[tokio::test]
async fn detach_policy_clears_the_reference() {
    let db = test_db().await;
    let (egypt, ramesses) = civilization_with_leader(&db).await;

    db.repos
        .civilization
        .delete(egypt.id, CivilizationDeletePolicy::Detach)
        .await
        .expect("delete");

    let loaded = db
        .repos
        .leader
        .get(ramesses.id)
        .await
        .expect("get")
        .expect("leader survives");
    assert_eq!(loaded.civilization_id, None);
    assert_eq!(loaded.traits.len(), 1);
}

#[tokio::test]
async fn deleting_an_unreferenced_civilization_succeeds_under_restrict() {
    let db = test_db().await;
    let zulu = db.repos.civilization.insert(&civ("Zulu")).await.expect("civ");
    db.repos
        .civilization
        .delete(zulu.id, CivilizationDeletePolicy::Restrict)
        .await
        .expect("delete");
    let err = db
        .repos
        .civilization
        .delete(zulu.id, CivilizationDeletePolicy::Restrict)
        .await
        .expect_err("gone");
    assert!(err.is_not_found());
}

#[tokio::test]
async fn leader_list_searches_sorts_and_filters_on_civilization_name() {
    let db = test_db().await;
    let rome = db.repos.civilization.insert(&civ("Rome")).await.expect("civ");
    let greece = db.repos.civilization.insert(&civ("Greece")).await.expect("civ");
    for (name, civilization) in [
        ("Augustus", Some(rome.id)),
        ("Trajan", Some(rome.id)),
        ("Pericles", Some(greece.id)),
        ("Genghis Khan", None),
    ] {
        let mut new = leader(name);
        if let Some(id) = civilization {
            new = new.in_civilization(id);
        }
        db.repos.leader.insert(&new).await.expect("leader");
    }

    let by_civilization = ListQuery::new()
        .with_search("rom")
        .search_in([LeaderColumn::Civilization])
        .sorted_by(LeaderColumn::Name, SortOrder::Descending);
    let page = db.repos.leader.list(&by_civilization).await.expect("list");
    let names: Vec<_> = page.items.iter().map(|l| l.to_string()).collect();
    assert_eq!(names, vec!["Trajan", "Augustus"]);
    assert_eq!(page.total, 2);

    let not_rome = ListQuery::new()
        .with_filter(LeaderColumn::Civilization, FilterOp::NotEquals, "Rome")
        .sorted_by(LeaderColumn::Name, SortOrder::Ascending);
    let page = db.repos.leader.list(&not_rome).await.expect("list");
    let names: Vec<_> = page.items.iter().map(|l| l.to_string()).collect();
    assert_eq!(names, vec!["Genghis Khan", "Pericles"]);
}

#[tokio::test]
async fn leader_search_matches_each_word_in_any_column() {
    let db = test_db().await;
    let rome = db.repos.civilization.insert(&civ("Rome")).await.expect("civ");
    db.repos
        .leader
        .insert(&leader("Augustus").in_civilization(rome.id))
        .await
        .expect("leader");
    db.repos
        .leader
        .insert(&leader("Trajan").in_civilization(rome.id))
        .await
        .expect("leader");
    db.repos.leader.insert(&leader("Augustin")).await.expect("leader");

    let query = ListQuery::new().with_search("augustus rome").search_in([
        LeaderColumn::Description,
        LeaderColumn::Name,
        LeaderColumn::Civilization,
    ]);
    let page = db.repos.leader.list(&query).await.expect("list");
    let names: Vec<_> = page.items.iter().map(|l| l.to_string()).collect();
    assert_eq!(names, vec!["Augustus"]);
    assert_eq!(page.total, 1);
}

#[tokio::test]
async fn civilization_list_pages_with_total() {
    let db = test_db().await;
    for name in ["Aztec", "Babylon", "China", "Denmark", "England"] {
        db.repos.civilization.insert(&civ(name)).await.expect("civ");
    }

    let query = ListQuery::new()
        .sorted_by(CivilizationColumn::Name, SortOrder::Ascending)
        .paged(1, 2);
    let page = db.repos.civilization.list(&query).await.expect("list");
    let names: Vec<_> = page.items.iter().map(|c| c.to_string()).collect();
    assert_eq!(names, vec!["China", "Denmark"]);
    assert_eq!(page.total, 5);
    assert_eq!(page.page_count(), 3);
}

#[tokio::test]
async fn tag_search_treats_wildcards_literally() {
    let db = test_db().await;
    db.repos.traits.insert(&trait_name("100% Loyal")).await.expect("trait");
    db.repos.traits.insert(&trait_name("1000 Cities")).await.expect("trait");

    let query = ListQuery::new().with_filter(TagColumn::Name, FilterOp::Contains, "0%");
    let page = db.repos.traits.list(&query).await.expect("list");
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].to_string(), "100% Loyal");
}

#[tokio::test]
async fn list_in_civilization_returns_only_members() {
    let db = test_db().await;
    let (egypt, ramesses) = civilization_with_leader(&db).await;
    db.repos.leader.insert(&leader("Lone Wolf")).await.expect("leader");

    let members = db
        .repos
        .leader
        .list_in_civilization(egypt.id)
        .await
        .expect("list");
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].id, ramesses.id);
}
