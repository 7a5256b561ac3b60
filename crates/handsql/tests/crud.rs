// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! CRUD statement synthesis and key handling, end to end against the
//! scripted executor.

mod common;

use common::{Code, Doc, FakeExecutor, OrderLine, Session, User, with_dialect};
use handsql::{Dialect, Filter, Key, Repository, Row, StatementError, Value, Where};

#[tokio::test]
async fn get_builds_aliased_select_and_maps_row() {
    let _guard = with_dialect(Dialect::SqlServer);
    let executor = FakeExecutor::new();
    executor.push_rows(vec![
        Row::new()
            .with("id", Value::I32(42))
            .with("last_name", Value::Text("Smith".into()))
            .with("age", Value::I32(31))
    ]);

    let repo = Repository::new(executor);
    let user: Option<User> = repo.get(42).await.unwrap();

    assert_eq!(
        user,
        Some(User {
            id:        42,
            last_name: "Smith".into(),
            age:       31
        })
    );
    let statement = repo.executor().last_statement();
    assert_eq!(
        statement.sql(),
        "SELECT [id], [LastName] AS [last_name], [age] FROM [Users] WHERE [id] = @id"
    );
    assert_eq!(statement.parameters()[0].value(), &Value::I32(42));
}

#[tokio::test]
async fn get_returns_none_for_empty_result() {
    let _guard = with_dialect(Dialect::SqlServer);
    let executor = FakeExecutor::new();
    executor.push_rows(Vec::new());

    let repo = Repository::new(executor);
    let user: Option<User> = repo.get(7).await.unwrap();
    assert_eq!(user, None);
}

#[tokio::test]
async fn insert_identity_key_appends_retrieval_and_writes_back() {
    let _guard = with_dialect(Dialect::SqlServer);
    let executor = FakeExecutor::new();
    executor.push_scalar(Some(Value::I64(11)));

    let repo = Repository::new(executor);
    let mut user = User {
        id:        0,
        last_name: "Jones".into(),
        age:       25
    };
    let key = repo.insert(&mut user).await.unwrap();

    assert_eq!(key, Value::I64(11));
    assert_eq!(user.id, 11);

    let statement = repo.executor().last_statement();
    assert_eq!(
        statement.sql(),
        "INSERT INTO [Users] ([LastName], [age]) VALUES (@last_name, @age); \
         SELECT CAST(SCOPE_IDENTITY() AS BIGINT) AS [Id]"
    );
    // The identity column is bound nowhere.
    assert!(statement.parameters().iter().all(|p| p.name() != "id"));
}

#[tokio::test]
async fn insert_uuid_key_generates_sequential_value() {
    let _guard = with_dialect(Dialect::Postgres);
    let executor = FakeExecutor::new();
    executor.push_affected(1);

    let repo = Repository::new(executor);
    let mut session = Session {
        id:        uuid::Uuid::nil(),
        user_name: "ana".into()
    };
    let key = repo.insert(&mut session).await.unwrap();

    assert!(!session.id.is_nil());
    assert_eq!(key, Value::Uuid(session.id));

    let statement = repo.executor().last_statement();
    assert_eq!(
        statement.sql(),
        "INSERT INTO \"Sessions\" (\"id\", \"user_name\") VALUES (@id, @user_name)"
    );
}

#[tokio::test]
async fn insert_uuid_key_preserves_caller_value() {
    let _guard = with_dialect(Dialect::Postgres);
    let executor = FakeExecutor::new();
    executor.push_affected(1);

    let supplied = uuid::Uuid::new_v4();
    let repo = Repository::new(executor);
    let mut session = Session {
        id:        supplied,
        user_name: "bo".into()
    };
    let key = repo.insert(&mut session).await.unwrap();

    assert_eq!(session.id, supplied);
    assert_eq!(key, Value::Uuid(supplied));
}

#[tokio::test]
async fn insert_round_trip_by_generated_key() {
    let _guard = with_dialect(Dialect::Postgres);
    let executor = FakeExecutor::new();
    executor.push_affected(1);

    let repo = Repository::new(executor);
    let mut session = Session {
        id:        uuid::Uuid::nil(),
        user_name: "carol".into()
    };
    let original = session.clone();
    let key = repo.insert(&mut session).await.unwrap();

    repo.executor().push_rows(vec![
        Row::new()
            .with("id", key.clone())
            .with("user_name", Value::Text("carol".into()))
    ]);
    let fetched: Session = repo.get(session.id).await.unwrap().unwrap();

    // Equal to the original except the key is now populated.
    assert_eq!(fetched.user_name, original.user_name);
    assert_eq!(fetched.id, session.id);
    assert!(!fetched.id.is_nil());
}

#[tokio::test]
async fn insert_missing_string_key_is_rejected_before_execution() {
    let _guard = with_dialect(Dialect::SqlServer);
    let executor = FakeExecutor::new();

    let repo = Repository::new(executor);
    let mut code = Code {
        code:  String::new(),
        label: "unset".into()
    };
    let err = repo.insert(&mut code).await.unwrap_err();

    match err {
        handsql::RepositoryError::Statement(StatementError::MissingStringKey {
            entity,
            field
        }) => {
            assert_eq!(entity, "Code");
            assert_eq!(field, "code");
        }
        other => panic!("unexpected error: {:?}", other)
    }
    assert!(repo.executor().statements().is_empty());
}

#[tokio::test]
async fn insert_string_key_uses_supplied_value() {
    let _guard = with_dialect(Dialect::SqlServer);
    let executor = FakeExecutor::new();
    executor.push_affected(1);

    let repo = Repository::new(executor);
    let mut code = Code {
        code:  "X1".into(),
        label: "first".into()
    };
    let key = repo.insert(&mut code).await.unwrap();

    assert_eq!(key, Value::Text("X1".into()));
    let statement = repo.executor().last_statement();
    assert_eq!(
        statement.sql(),
        "INSERT INTO [Codes] ([code], [label]) VALUES (@code, @label)"
    );
}

#[tokio::test]
async fn insert_identity_unsupported_on_oracle() {
    let _guard = with_dialect(Dialect::Oracle);
    let executor = FakeExecutor::new();

    let repo = Repository::new(executor);
    let mut user = User::default();
    let err = repo.insert(&mut user).await.unwrap_err();

    assert!(matches!(
        err,
        handsql::RepositoryError::Statement(StatementError::IdentityUnsupported {
            dialect: Dialect::Oracle
        })
    ));
    assert!(repo.executor().statements().is_empty());
}

#[tokio::test]
async fn update_increments_version_and_guards_where() {
    let _guard = with_dialect(Dialect::SqlServer);
    let executor = FakeExecutor::new();
    executor.push_affected(1);

    let repo = Repository::new(executor);
    let doc = Doc {
        id:      5,
        body:    "text".into(),
        version: 3
    };
    let affected = repo.update(&doc).await.unwrap();

    assert_eq!(affected, 1);
    let statement = repo.executor().last_statement();
    assert_eq!(
        statement.sql(),
        "UPDATE [Docs] SET [body] = @body, [version] = @version + 1 \
         WHERE [id] = @id AND [version] = @version"
    );
    let version = statement
        .parameters()
        .iter()
        .find(|p| p.name() == "version")
        .unwrap();
    assert_eq!(version.value(), &Value::I64(3));
}

#[tokio::test]
async fn update_without_version_uses_plain_key_predicate() {
    let _guard = with_dialect(Dialect::SqlServer);
    let executor = FakeExecutor::new();
    executor.push_affected(1);

    let repo = Repository::new(executor);
    let user = User {
        id:        8,
        last_name: "Reed".into(),
        age:       50
    };
    repo.update(&user).await.unwrap();

    assert_eq!(
        repo.executor().last_statement().sql(),
        "UPDATE [Users] SET [LastName] = @last_name, [age] = @age WHERE [id] = @id"
    );
}

#[tokio::test]
async fn composite_delete_matches_every_key_column() {
    let _guard = with_dialect(Dialect::SqlServer);
    let executor = FakeExecutor::new();
    executor.push_affected(1);

    let repo = Repository::new(executor);
    let line = OrderLine {
        order_id:    10,
        line_number: 2,
        quantity:    6
    };
    repo.delete(&line).await.unwrap();

    let statement = repo.executor().last_statement();
    assert_eq!(
        statement.sql(),
        "DELETE FROM [OrderLines] WHERE [order_id] = @order_id AND [line_number] = @line_number"
    );
    assert_eq!(statement.parameters().len(), 2);
}

#[tokio::test]
async fn composite_get_by_key() {
    let _guard = with_dialect(Dialect::SqlServer);
    let executor = FakeExecutor::new();
    executor.push_rows(vec![
        Row::new()
            .with("order_id", Value::I32(10))
            .with("line_number", Value::I32(2))
            .with("quantity", Value::I32(6))
    ]);

    let repo = Repository::new(executor);
    let key = Key::composite([("order_id", 10_i32), ("line_number", 2_i32)]);
    let line: Option<OrderLine> = repo.get(key).await.unwrap();
    assert_eq!(line.unwrap().quantity, 6);
}

#[tokio::test]
async fn composite_single_value_key_is_rejected() {
    let _guard = with_dialect(Dialect::SqlServer);
    let executor = FakeExecutor::new();

    let repo = Repository::new(executor);
    let err = repo.get::<OrderLine>(10).await.unwrap_err();
    assert!(matches!(
        err,
        handsql::RepositoryError::Statement(StatementError::KeyArity { .. })
    ));
}

#[tokio::test]
async fn delete_by_key_builds_predicate() {
    let _guard = with_dialect(Dialect::MySql);
    let executor = FakeExecutor::new();
    executor.push_affected(1);

    let repo = Repository::new(executor);
    let affected = repo.delete_by_key::<User>(3).await.unwrap();

    assert_eq!(affected, 1);
    assert_eq!(
        repo.executor().last_statement().sql(),
        "DELETE FROM `Users` WHERE `id` = @id"
    );
}

#[tokio::test]
async fn delete_where_filter_and_raw() {
    let _guard = with_dialect(Dialect::SqlServer);
    let executor = FakeExecutor::new();
    executor.push_affected(4);
    executor.push_affected(2);

    let repo = Repository::new(executor);

    let by_filter = repo
        .delete_where::<User>(Where::Filter(Filter::new().equals("age", 99)))
        .await
        .unwrap();
    assert_eq!(by_filter, 4);
    assert_eq!(
        repo.executor().last_statement().sql(),
        "DELETE FROM [Users] WHERE [age] = @age"
    );

    let by_raw = repo
        .delete_where::<User>(Where::raw("WHERE age < 0"))
        .await
        .unwrap();
    assert_eq!(by_raw, 2);
    assert_eq!(
        repo.executor().last_statement().sql(),
        "DELETE FROM [Users] WHERE age < 0"
    );
}

#[tokio::test]
async fn count_reads_scalar() {
    let _guard = with_dialect(Dialect::SqlServer);
    let executor = FakeExecutor::new();
    executor.push_scalar(Some(Value::I64(5)));

    let repo = Repository::new(executor);
    let count = repo.count::<User>(Where::All).await.unwrap();

    assert_eq!(count, 5);
    assert_eq!(
        repo.executor().last_statement().sql(),
        "SELECT COUNT(*) FROM [Users]"
    );
}

#[tokio::test]
async fn list_renders_null_filter_entries_as_is_null() {
    let _guard = with_dialect(Dialect::SqlServer);
    let executor = FakeExecutor::new();
    executor.push_rows(Vec::new());

    let repo = Repository::new(executor);
    let filter = Filter::new().equals("age", 10).is_null("last_name");
    let _: Vec<User> = repo
        .list(Where::Filter(filter), None)
        .await
        .unwrap();

    assert_eq!(
        repo.executor().last_statement().sql(),
        "SELECT [id], [LastName] AS [last_name], [age] FROM [Users] \
         WHERE [age] = @age AND [LastName] IS NULL"
    );
}

#[tokio::test]
async fn database_errors_propagate_unchanged() {
    // An executor that always fails.
    struct FailingExecutor;

    #[handsql::async_trait]
    impl handsql::Executor for FailingExecutor {
        type Error = common::FakeDbError;

        async fn fetch(
            &self,
            _statement: &handsql::Statement
        ) -> Result<Vec<Row>, Self::Error> {
            Err(common::FakeDbError("connection refused".into()))
        }

        async fn fetch_scalar(
            &self,
            _statement: &handsql::Statement
        ) -> Result<Option<Value>, Self::Error> {
            Err(common::FakeDbError("connection refused".into()))
        }

        async fn execute(
            &self,
            _statement: &handsql::Statement
        ) -> Result<u64, Self::Error> {
            Err(common::FakeDbError("connection refused".into()))
        }
    }

    let _guard = with_dialect(Dialect::SqlServer);
    let repo = Repository::new(FailingExecutor);
    let err = repo.get::<User>(1).await.unwrap_err();

    match err {
        handsql::RepositoryError::Database(db) => {
            assert_eq!(db.0, "connection refused");
        }
        other => panic!("unexpected error: {:?}", other)
    }
}
