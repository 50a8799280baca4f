//! SQL statements for the PostgreSQL balance store.
//!
//! Balances are `DECIMAL` on disk and `FLOAT8` on the wire; the casts keep
//! parameter and column types aligned with `f64`.

pub const CREATE_TABLE_BANK_GROUP: &str = "
    CREATE TABLE IF NOT EXISTS bank_group (
        id VARCHAR(50) NOT NULL PRIMARY KEY,
        currency VARCHAR(50)
    )";

pub const CREATE_TABLE_PLAYER: &str = "
    CREATE TABLE IF NOT EXISTS player (
        player_id VARCHAR(50) NOT NULL PRIMARY KEY,
        nick_name VARCHAR(50),
        bank_group_id VARCHAR(50),
        balance DECIMAL
    )";

pub const INSERT_PLAYER: &str = "
    INSERT INTO player (player_id, nick_name, bank_group_id, balance)
    VALUES ($1, $2, $3, $4::FLOAT8)";

pub const SELECT_PLAYER_BY_ID: &str = "
    SELECT player_id, nick_name, bank_group_id, COALESCE(balance, 0)::FLOAT8
    FROM player
    WHERE player_id = $1";

pub const UPDATE_PLAYER_BALANCE: &str = "
    UPDATE player
    SET balance = $1::FLOAT8
    WHERE player_id = $2";
