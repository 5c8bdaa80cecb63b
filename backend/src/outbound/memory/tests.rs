//! Regression coverage for this module.

use super::*;
use crate::domain::{PasswordDigest, Quantity};
use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use rstest::{fixture, rstest};

struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    fn advance_seconds(&self, seconds: i64) {
        let mut now = self.0.lock().expect("clock mutex");
        *now += TimeDelta::seconds(seconds);
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.0.lock().expect("clock mutex")
    }
}

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 5, 1, 9, 0, 0)
        .single()
        .expect("valid timestamp")
}

struct Harness {
    clock: Arc<MutableClock>,
    store: InMemoryStore,
}

#[fixture]
fn harness() -> Harness {
    let clock = Arc::new(MutableClock(Mutex::new(start())));
    let store = InMemoryStore::with_clock(clock.clone());
    Harness { clock, store }
}

fn milk() -> NewItem {
    NewItem {
        name: "Milk".to_owned(),
        quantity: Some(Quantity::new(2.0)),
        ..NewItem::default()
    }
}

#[rstest]
#[tokio::test]
async fn lists_include_owned_and_shared_filtered_by_archived(harness: Harness) {
    let store = &harness.store;
    let own = store.create("Own", "u1").await.expect("create own");
    harness.clock.advance_seconds(1);
    let shared = store.create("Shared", "u2").await.expect("create shared");
    store.create("Foreign", "u3").await.expect("create foreign");
    store
        .add_member(&shared.id, "u1", MemberRole::Member)
        .await
        .expect("share");
    store.archive(&own.id).await.expect("archive");

    let all = store.list_for_user("u1", None).await.expect("list all");
    let names: Vec<_> = all.iter().map(|list| list.name.as_str()).collect();
    assert_eq!(names, vec!["Own", "Shared"]);

    let archived = store.list_for_user("u1", Some(true)).await.expect("archived");
    assert_eq!(archived.len(), 1);
    assert_eq!(archived.first().map(|list| list.id.as_str()), Some(own.id.as_str()));

    let active = store.list_for_user("u1", Some(false)).await.expect("active");
    assert_eq!(active.first().map(|list| list.id.as_str()), Some(shared.id.as_str()));
}

#[rstest]
#[tokio::test]
async fn delete_cascades_to_members(harness: Harness) {
    let store = &harness.store;
    let list = store.create("Groceries", "u1").await.expect("create");
    store
        .add_member(&list.id, "u2", MemberRole::Member)
        .await
        .expect("add member");

    store.delete(&list.id).await.expect("delete");

    assert!(store.member_ids(&list.id).await.expect("ids").is_empty());
    assert_eq!(
        store.delete(&list.id).await,
        Err(ShoppingListRepositoryError::not_found(list.id.clone()))
    );
}

#[rstest]
#[tokio::test]
async fn duplicate_membership_is_rejected(harness: Harness) {
    let store = &harness.store;
    let list = store.create("Groceries", "u1").await.expect("create");
    store
        .add_member(&list.id, "u2", MemberRole::Member)
        .await
        .expect("first add");

    let second = store.add_member(&list.id, "u2", MemberRole::Member).await;
    assert!(matches!(second, Err(MemberRepositoryError::AlreadyExists { .. })));

    store.remove_member(&list.id, "u2").await.expect("remove");
    store
        .add_member(&list.id, "u2", MemberRole::Owner)
        .await
        .expect("re-add after removal");
    assert!(store.is_member(&list.id, "u2").await.expect("is member"));
}

#[rstest]
#[tokio::test]
async fn removing_an_absent_member_fails(harness: Harness) {
    let store = &harness.store;
    let list = store.create("Groceries", "u1").await.expect("create");
    let result = store.remove_member(&list.id, "u9").await;
    assert!(matches!(result, Err(MemberRepositoryError::NotFound { .. })));
}

#[rstest]
#[tokio::test]
async fn completion_refreshes_item_and_list_timestamps(harness: Harness) {
    let store = &harness.store;
    let list = store.create("Groceries", "u1").await.expect("create");
    let item = store.add_item(&list.id, &milk()).await.expect("add item");
    assert!(!item.completed);

    harness.clock.advance_seconds(30);
    let updated = store
        .set_completed(&list.id, &item.id, true)
        .await
        .expect("complete");

    assert!(updated.completed);
    assert_eq!(updated.created_at, Some(start()));
    assert_eq!(updated.updated_at, Some(start() + TimeDelta::seconds(30)));
    let stored = ShoppingListRepository::find_by_id(store, &list.id)
        .await
        .expect("find")
        .expect("list exists");
    assert_eq!(stored.updated_at, start() + TimeDelta::seconds(30));
}

#[rstest]
#[tokio::test]
async fn item_lookups_distinguish_missing_list_from_missing_item(harness: Harness) {
    let store = &harness.store;
    let list = store.create("Groceries", "u1").await.expect("create");

    assert_eq!(
        store.find_item("nope", "item-1").await,
        Err(ItemRepositoryError::shopping_list_not_found("nope"))
    );
    assert_eq!(
        store.remove_item(&list.id, "item-1").await,
        Err(ItemRepositoryError::item_not_found("item-1"))
    );

    let item = store.add_item(&list.id, &milk()).await.expect("add");
    assert_eq!(store.find_item(&list.id, &item.id).await, Ok(item.clone()));
    store.remove_item(&list.id, &item.id).await.expect("remove");
    assert!(store.list_items(&list.id).await.expect("items").is_empty());
}

#[rstest]
#[tokio::test]
async fn accounts_are_unique_by_email(harness: Harness) {
    let store = &harness.store;
    let account = UserAccount {
        user: User::new("user1", "John Doe", Some("john.doe@email.com".to_owned())),
        password: PasswordDigest::generate("password123"),
    };
    store.insert(&account).await.expect("insert");

    assert_eq!(
        store.insert(&account).await,
        Err(UserRepositoryError::duplicate_email("john.doe@email.com"))
    );
    assert_eq!(
        UserRepository::find_by_id(store, "user1")
            .await
            .expect("lookup"),
        Some(account.user.clone())
    );
    assert!(
        store
            .find_by_email("jane.smith@email.com")
            .await
            .expect("lookup")
            .is_none()
    );
}
