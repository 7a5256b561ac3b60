// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Paged and ordered queries: allow-list validation, paging templates,
//! and dialect-switch cache invalidation.

mod common;

use common::{FakeExecutor, User, with_dialect};
use handsql::{
    Dialect, OrderBy, Repository, RepositoryError, SortDirection, StatementError, Where
};

#[tokio::test]
async fn page_number_zero_is_rejected_before_execution() {
    let _guard = with_dialect(Dialect::SqlServer);
    let executor = FakeExecutor::new();

    let repo = Repository::new(executor);
    let err = repo
        .list_paged::<User>(0, 10, Where::All, None)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        RepositoryError::Statement(StatementError::PageNumber { page: 0 })
    ));
    assert!(repo.executor().statements().is_empty());
}

#[tokio::test]
async fn negative_page_number_is_rejected() {
    let _guard = with_dialect(Dialect::SqlServer);
    let repo = Repository::new(FakeExecutor::new());
    let err = repo
        .list_paged::<User>(-3, 10, Where::All, None)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RepositoryError::Statement(StatementError::PageNumber { page: -3 })
    ));
}

#[tokio::test]
async fn sql_server_paging_uses_row_number_window() {
    let _guard = with_dialect(Dialect::SqlServer);
    let executor = FakeExecutor::new();
    executor.push_rows(Vec::new());

    let repo = Repository::new(executor);
    let _: Vec<User> = repo
        .list_paged(2, 10, Where::All, Some(OrderBy::text("LastName")))
        .await
        .unwrap();

    let sql = repo.executor().last_statement().sql().to_string();
    assert!(sql.contains("ROW_NUMBER() OVER(ORDER BY [LastName] ASC)"), "got: {}", sql);
    assert!(sql.contains("BETWEEN ((2-1) * 10 + 1) AND (2 * 10)"), "got: {}", sql);
}

#[tokio::test]
async fn mysql_paging_precomputes_offset() {
    let _guard = with_dialect(Dialect::MySql);
    let executor = FakeExecutor::new();
    executor.push_rows(Vec::new());

    let repo = Repository::new(executor);
    let _: Vec<User> = repo
        .list_paged(3, 10, Where::All, Some(OrderBy::text("age DESC")))
        .await
        .unwrap();

    let sql = repo.executor().last_statement().sql().to_string();
    assert!(sql.contains("ORDER BY `age` DESC LIMIT 20,10"), "got: {}", sql);
}

#[tokio::test]
async fn default_order_is_first_key_column() {
    let _guard = with_dialect(Dialect::Postgres);
    let executor = FakeExecutor::new();
    executor.push_rows(Vec::new());

    let repo = Repository::new(executor);
    let _: Vec<User> = repo.list_paged(1, 5, Where::All, None).await.unwrap();

    let sql = repo.executor().last_statement().sql().to_string();
    assert!(sql.contains("ORDER BY \"id\""), "got: {}", sql);
}

#[tokio::test]
async fn unknown_order_column_is_rejected() {
    let _guard = with_dialect(Dialect::SqlServer);
    let repo = Repository::new(FakeExecutor::new());

    let err = repo
        .list_paged::<User>(1, 10, Where::All, Some(OrderBy::text("Nope DESC")))
        .await
        .unwrap_err();

    assert!(err.to_string().contains("Invalid ORDER BY column"));
    assert!(repo.executor().statements().is_empty());
}

#[tokio::test]
async fn unknown_order_direction_is_rejected() {
    let _guard = with_dialect(Dialect::SqlServer);
    let repo = Repository::new(FakeExecutor::new());

    let err = repo
        .list_paged::<User>(1, 10, Where::All, Some(OrderBy::text("LastName SIDEWAYS")))
        .await
        .unwrap_err();

    assert!(err.to_string().contains("Invalid ORDER BY direction"));
}

#[tokio::test]
async fn multi_column_order_preserves_precedence() {
    let _guard = with_dialect(Dialect::SqlServer);
    let executor = FakeExecutor::new();
    executor.push_rows(Vec::new());

    let repo = Repository::new(executor);
    let _: Vec<User> = repo
        .list(
            Where::All,
            Some(OrderBy::text("LastName ASC, age DESC"))
        )
        .await
        .unwrap();

    let sql = repo.executor().last_statement().sql().to_string();
    assert!(sql.ends_with("ORDER BY [LastName] ASC, [age] DESC"), "got: {}", sql);
}

#[tokio::test]
async fn typed_tokens_bypass_free_text_validation() {
    let _guard = with_dialect(Dialect::SqlServer);
    let executor = FakeExecutor::new();
    executor.push_rows(Vec::new());

    let repo = Repository::new(executor);
    let order = OrderBy::fields(vec![
        (User::LAST_NAME, SortDirection::Asc),
        (User::AGE, SortDirection::Desc)
    ]);
    let _: Vec<User> = repo.list(Where::All, Some(order)).await.unwrap();

    let sql = repo.executor().last_statement().sql().to_string();
    assert!(sql.ends_with("ORDER BY [LastName] ASC, [age] DESC"), "got: {}", sql);
}

#[tokio::test]
async fn quoted_and_qualified_order_tokens_normalize() {
    let _guard = with_dialect(Dialect::SqlServer);
    let executor = FakeExecutor::new();
    executor.push_rows(Vec::new());

    let repo = Repository::new(executor);
    let _: Vec<User> = repo
        .list(Where::All, Some(OrderBy::text("[LastName] DESC, u.age")))
        .await
        .unwrap();

    let sql = repo.executor().last_statement().sql().to_string();
    assert!(sql.ends_with("ORDER BY [LastName] DESC, [age] ASC"), "got: {}", sql);
}

#[tokio::test]
async fn dialect_switch_invalidates_allowed_map() {
    let _guard = with_dialect(Dialect::Sqlite);
    let executor = FakeExecutor::new();
    executor.push_rows(Vec::new());

    let repo = Repository::new(executor);
    let _: Vec<User> = repo
        .list_paged(1, 2, Where::All, Some(OrderBy::text("LastName")))
        .await
        .unwrap();
    let sqlite_sql = repo.executor().last_statement().sql().to_string();
    assert!(sqlite_sql.contains("ORDER BY \"LastName\" ASC"), "got: {}", sqlite_sql);

    handsql::set_active_dialect(Dialect::SqlServer);
    repo.executor().push_rows(Vec::new());
    let _: Vec<User> = repo
        .list_paged(1, 2, Where::All, Some(OrderBy::text("LastName")))
        .await
        .unwrap();
    let server_sql = repo.executor().last_statement().sql().to_string();
    assert!(server_sql.contains("ORDER BY [LastName] ASC"), "got: {}", server_sql);
    assert!(!server_sql.contains("\"LastName\""), "got: {}", server_sql);
}

#[tokio::test]
async fn list_all_has_no_where_or_order() {
    let _guard = with_dialect(Dialect::SqlServer);
    let executor = FakeExecutor::new();
    executor.push_rows(Vec::new());

    let repo = Repository::new(executor);
    let _: Vec<User> = repo.list_all().await.unwrap();

    assert_eq!(
        repo.executor().last_statement().sql(),
        "SELECT [id], [LastName] AS [last_name], [age] FROM [Users]"
    );
}
