// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Shared test fixtures: a scripted fake executor and sample entities.

// Each test binary uses a different slice of these fixtures.
#![allow(dead_code)]

use std::{
    collections::VecDeque,
    fmt,
    sync::{Mutex, MutexGuard}
};

use handsql::{
    Dialect, Entity, Executor, Row, Statement, Value, async_trait, set_active_dialect
};

/// One canned executor response.
pub enum Response {
    Rows(Vec<Row>),
    Scalar(Option<Value>),
    Affected(u64)
}

#[derive(Debug)]
pub struct FakeDbError(pub String);

impl fmt::Display for FakeDbError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for FakeDbError {}

/// Executor that records statements and replays canned responses.
#[derive(Default)]
pub struct FakeExecutor {
    responses:  Mutex<VecDeque<Response>>,
    statements: Mutex<Vec<Statement>>
}

impl FakeExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_rows(&self, rows: Vec<Row>) {
        self.responses.lock().unwrap().push_back(Response::Rows(rows));
    }

    pub fn push_scalar(&self, value: Option<Value>) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Response::Scalar(value));
    }

    pub fn push_affected(&self, count: u64) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Response::Affected(count));
    }

    pub fn statements(&self) -> Vec<Statement> {
        self.statements.lock().unwrap().clone()
    }

    pub fn last_statement(&self) -> Statement {
        self.statements
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no statement was executed")
    }

    fn record(&self, statement: &Statement) {
        self.statements.lock().unwrap().push(statement.clone());
    }

    fn pop(&self) -> Response {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("fake executor ran out of canned responses")
    }
}

#[async_trait]
impl Executor for FakeExecutor {
    type Error = FakeDbError;

    async fn fetch(&self, statement: &Statement) -> Result<Vec<Row>, Self::Error> {
        self.record(statement);
        match self.pop() {
            Response::Rows(rows) => Ok(rows),
            _ => panic!("expected a rows response for: {}", statement)
        }
    }

    async fn fetch_scalar(&self, statement: &Statement) -> Result<Option<Value>, Self::Error> {
        self.record(statement);
        match self.pop() {
            Response::Scalar(value) => Ok(value),
            _ => panic!("expected a scalar response for: {}", statement)
        }
    }

    async fn execute(&self, statement: &Statement) -> Result<u64, Self::Error> {
        self.record(statement);
        match self.pop() {
            Response::Affected(count) => Ok(count),
            _ => panic!("expected an affected-count response for: {}", statement)
        }
    }
}

// The active dialect is process-wide; tests that touch it serialize here.
static DIALECT: Mutex<()> = Mutex::new(());

/// Lock the dialect for the duration of a test and switch it.
pub fn with_dialect(dialect: Dialect) -> MutexGuard<'static, ()> {
    let guard = DIALECT.lock().unwrap_or_else(|e| e.into_inner());
    set_active_dialect(dialect);
    guard
}

#[derive(Entity, Debug, Clone, PartialEq, Default)]
#[entity(table = "Users")]
pub struct User {
    #[column(key)]
    pub id: i32,

    #[column(name = "LastName")]
    pub last_name: String,

    pub age: i32
}

#[derive(Entity, Debug, Clone, PartialEq, Default)]
#[entity(table = "Sessions")]
pub struct Session {
    #[column(key)]
    pub id: uuid::Uuid,

    pub user_name: String
}

#[derive(Entity, Debug, Clone, PartialEq, Default)]
#[entity(table = "Codes")]
pub struct Code {
    #[column(key)]
    pub code: String,

    pub label: String
}

#[derive(Entity, Debug, Clone, PartialEq, Default)]
#[entity(table = "OrderLines")]
pub struct OrderLine {
    #[column(key, required)]
    pub order_id: i32,

    #[column(key, required)]
    pub line_number: i32,

    pub quantity: i32
}

#[derive(Entity, Debug, Clone, PartialEq, Default)]
#[entity(table = "Docs")]
pub struct Doc {
    #[column(key)]
    pub id: i32,

    pub body: String,

    pub version: i64
}
