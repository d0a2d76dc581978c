#![allow(dead_code)]

use cofre_core::db::open_db_in_memory;
use cofre_core::{CategoryRecord, TransactedConnection};

/// Seed data: categories 1..=8 and two secrets.
///
/// `API`, `QA`, `Banco de dados` and `Produção` are linked to secrets and
/// protected by `ON DELETE RESTRICT`; the others are free to delete.
pub const SEED_SQL: &str = "
INSERT INTO category (pk_category, name) VALUES (1, 'Banco de dados');
INSERT INTO category (pk_category, name) VALUES (2, 'Aplicação');
INSERT INTO category (pk_category, name) VALUES (3, 'Servidor');
INSERT INTO category (pk_category, name) VALUES (4, 'API');
INSERT INTO category (pk_category, name) VALUES (5, 'Produção');
INSERT INTO category (pk_category, name) VALUES (6, 'Homologação');
INSERT INTO category (pk_category, name) VALUES (7, 'Desenvolvimento');
INSERT INTO category (pk_category, name) VALUES (8, 'QA');

INSERT INTO secret (pk_secret, name, description) VALUES (1, 'Cofre de senhas', 'credenciais da API');
INSERT INTO secret (pk_secret, name, description) VALUES (2, 'Banco principal', 'senha do banco');

INSERT INTO secret_category (pk_secret, pk_category) VALUES (1, 4);
INSERT INTO secret_category (pk_secret, pk_category) VALUES (1, 8);
INSERT INTO secret_category (pk_secret, pk_category) VALUES (2, 1);
INSERT INTO secret_category (pk_secret, pk_category) VALUES (2, 5);
";

pub const MISSING_KEYS: [i64; 3] = [-1, 333, 8888];

pub fn long_name() -> String {
    "x".repeat(51)
}

pub fn seeded_connection() -> TransactedConnection {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch(SEED_SQL).unwrap();
    TransactedConnection::new(conn)
}

pub fn banco_de_dados() -> CategoryRecord {
    CategoryRecord::new(1, "Banco de dados")
}

pub fn aplicacao() -> CategoryRecord {
    CategoryRecord::new(2, "Aplicação")
}

pub fn servidor() -> CategoryRecord {
    CategoryRecord::new(3, "Servidor")
}

pub fn api() -> CategoryRecord {
    CategoryRecord::new(4, "API")
}

pub fn producao() -> CategoryRecord {
    CategoryRecord::new(5, "Produção")
}

pub fn homologacao() -> CategoryRecord {
    CategoryRecord::new(6, "Homologação")
}

pub fn desenvolvimento() -> CategoryRecord {
    CategoryRecord::new(7, "Desenvolvimento")
}

pub fn qa() -> CategoryRecord {
    CategoryRecord::new(8, "QA")
}

/// First key handed out after the seed.
pub fn millenium_falcon() -> CategoryRecord {
    CategoryRecord::new(9, "Millenium Falcon")
}

pub fn all_categories() -> Vec<CategoryRecord> {
    vec![
        banco_de_dados(),
        aplicacao(),
        servidor(),
        api(),
        producao(),
        homologacao(),
        desenvolvimento(),
        qa(),
    ]
}

/// `API`, `Produção`, `Homologação` in key order.
pub fn some_categories() -> Vec<CategoryRecord> {
    vec![api(), producao(), homologacao()]
}
