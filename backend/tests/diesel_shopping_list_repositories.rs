//! Integration tests for the Diesel shopping list, item and member adapters.
//!
//! Each context boots embedded PostgreSQL, creates a fresh database and runs
//! the embedded migrations, so the foreign keys, cascades and the
//! `(shopping_list_id, user_id)` unique index are the real ones.

use pg_embedded_setup_unpriv::TestCluster;
use rstest::{fixture, rstest};
use tokio::runtime::Runtime;
use uuid::Uuid;

use shopping_list::domain::ports::{
    ItemRepository, ItemRepositoryError, MemberRepository, MemberRepositoryError,
    ShoppingListRepository, ShoppingListRepositoryError,
};
use shopping_list::domain::{MemberRole, NewItem, Quantity, ShoppingList};
use shopping_list::outbound::persistence::{
    DbPool, DieselItemRepository, DieselMemberRepository, DieselShoppingListRepository,
    PoolConfig, run_migrations,
};

mod support;

use support::pg_embed::test_cluster;
use support::{count_rows_for_list, create_database, handle_cluster_setup_failure};

struct TestContext {
    runtime: Runtime,
    _cluster: TestCluster,
    lists: DieselShoppingListRepository,
    items: DieselItemRepository,
    members: DieselMemberRepository,
    database_url: String,
}

fn setup_context() -> Result<TestContext, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let cluster = test_cluster()?;
    let database = format!("shopping_{}", Uuid::new_v4().simple());
    let admin_url = cluster.connection().database_url("postgres");
    create_database(&admin_url, &database)?;
    let database_url = cluster.connection().database_url(&database).to_string();
    run_migrations(&database_url).map_err(|err| err.to_string())?;

    let config = PoolConfig::new(database_url.as_str())
        .with_max_size(2)
        .with_min_idle(Some(1));
    let pool = runtime
        .block_on(async { DbPool::new(config).await })
        .map_err(|err| err.to_string())?;

    Ok(TestContext {
        runtime,
        _cluster: cluster,
        lists: DieselShoppingListRepository::new(pool.clone()),
        items: DieselItemRepository::new(pool.clone()),
        members: DieselMemberRepository::new(pool),
        database_url,
    })
}

#[fixture]
fn repo_context() -> Option<TestContext> {
    match setup_context() {
        Ok(ctx) => Some(ctx),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

fn create_list(context: &TestContext, name: &str, owner_id: &str) -> ShoppingList {
    context
        .runtime
        .block_on(async { context.lists.create(name, owner_id).await })
        .expect("create list")
}

fn milk() -> NewItem {
    NewItem {
        name: "Milk".to_owned(),
        product_id: None,
        quantity: Some(Quantity::new(2.0)),
        fit: None,
    }
}

#[rstest]
fn second_membership_for_the_same_user_is_rejected(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: second_membership_for_the_same_user_is_rejected skipped");
        return;
    };
    let list = create_list(&context, "Party", "user-1");

    let (first, second) = context.runtime.block_on(async {
        let first = context
            .members
            .add_member(&list.id, "user-2", MemberRole::Member)
            .await;
        let second = context
            .members
            .add_member(&list.id, "user-2", MemberRole::Member)
            .await;
        (first, second)
    });

    let member = first.expect("first membership");
    assert_eq!(member.user_id, "user-2");
    assert_eq!(member.role, MemberRole::Member);
    assert!(
        matches!(second, Err(MemberRepositoryError::AlreadyExists { .. })),
        "duplicate insert should surface as AlreadyExists, got {second:?}"
    );

    let ids = context
        .runtime
        .block_on(async { context.members.member_ids(&list.id).await })
        .expect("member ids");
    assert_eq!(ids, vec!["user-2".to_owned()]);
}

#[rstest]
fn deleting_a_list_cascades_to_items_and_members(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: deleting_a_list_cascades_to_items_and_members skipped");
        return;
    };
    let list = create_list(&context, "Groceries", "user-1");

    context.runtime.block_on(async {
        context
            .items
            .add_item(&list.id, &milk())
            .await
            .expect("add item");
        context
            .members
            .add_member(&list.id, "user-2", MemberRole::Member)
            .await
            .expect("add member");
    });
    let url = context.database_url.as_str();
    assert_eq!(count_rows_for_list(url, "shopping_list_items", &list.id), Ok(1));
    assert_eq!(count_rows_for_list(url, "shopping_list_members", &list.id), Ok(1));

    context
        .runtime
        .block_on(async { context.lists.delete(&list.id).await })
        .expect("delete list");

    assert_eq!(count_rows_for_list(url, "shopping_list_items", &list.id), Ok(0));
    assert_eq!(count_rows_for_list(url, "shopping_list_members", &list.id), Ok(0));

    context.runtime.block_on(async {
        let found = context.lists.find_by_id(&list.id).await.expect("lookup");
        assert!(found.is_none());

        let items = context.items.list_items(&list.id).await;
        assert!(matches!(
            items,
            Err(ItemRepositoryError::ShoppingListNotFound { .. })
        ));

        let again = context.lists.delete(&list.id).await;
        assert!(matches!(
            again,
            Err(ShoppingListRepositoryError::NotFound { .. })
        ));
    });
}

#[rstest]
#[case::all(None, &["Groceries", "Hardware", "Party"])]
#[case::active_only(Some(false), &["Groceries", "Party"])]
#[case::archived_only(Some(true), &["Hardware"])]
fn lists_for_user_cover_owned_and_shared_lists(
    repo_context: Option<TestContext>,
    #[case] archived: Option<bool>,
    #[case] expected: &[&str],
) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: lists_for_user_cover_owned_and_shared_lists skipped");
        return;
    };
    create_list(&context, "Groceries", "user-1");
    let hardware = create_list(&context, "Hardware", "user-1");
    let party = create_list(&context, "Party", "user-2");
    create_list(&context, "Unrelated", "user-3");

    let mut names: Vec<String> = context
        .runtime
        .block_on(async {
            context.lists.archive(&hardware.id).await?;
            context
                .members
                .add_member(&party.id, "user-1", MemberRole::Member)
                .await
                .map_err(|err| ShoppingListRepositoryError::query(err.to_string()))?;
            context.lists.list_for_user("user-1", archived).await
        })
        .expect("list for user")
        .into_iter()
        .map(|list| list.name)
        .collect();
    names.sort();

    assert_eq!(names, expected);
}
