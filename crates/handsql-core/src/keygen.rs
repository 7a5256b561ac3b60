// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Client-side sequential identifier generation.
//!
//! UUID primary keys inserted in random order fragment clustered indexes.
//! [`sequential_uuid`] keeps the random 10-byte prefix for uniqueness and
//! overwrites the trailing 6 bytes with a coarse UTC timestamp so values
//! generated close in time sort close together under the database's native
//! byte ordering:
//!
//! - bytes 10..12 — big-endian day count since 1900-01-01;
//! - bytes 12..16 — big-endian sub-day milliseconds scaled by 1/3.333333
//!   (the classic 1/300-second tick resolution).
//!
//! The timestamp component exists purely to reduce index fragmentation;
//! uniqueness comes from the random prefix.

use chrono::{Datelike, Timelike, Utc};
use uuid::Uuid;

// Day number of 1900-01-01 in the proleptic Gregorian calendar.
const EPOCH_DAYS_FROM_CE: i32 = 693_596;

const TICK_SCALE: f64 = 3.333_333;

/// Generate a sequential 128-bit identifier.
#[must_use]
pub fn sequential_uuid() -> Uuid {
    let now = Utc::now();
    sequential_uuid_at(
        now.date_naive().num_days_from_ce(),
        u64::from(now.time().num_seconds_from_midnight()) * 1_000
            + u64::from(now.time().nanosecond() / 1_000_000)
    )
}

fn sequential_uuid_at(days_from_ce: i32, millis_of_day: u64) -> Uuid {
    let mut bytes = *Uuid::new_v4().as_bytes();

    let days = days_from_ce.saturating_sub(EPOCH_DAYS_FROM_CE).max(0) as u16;
    let ticks = (millis_of_day as f64 / TICK_SCALE) as u32;

    bytes[10..12].copy_from_slice(&days.to_be_bytes());
    bytes[12..16].copy_from_slice(&ticks.to_be_bytes());
    Uuid::from_bytes(bytes)
}
