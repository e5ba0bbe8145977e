//! Tabelas de consulta compartilhadas pelas regras de validação
//!
//! Os conjuntos são construídos uma única vez e reutilizados por todas as
//! validações.

use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Códigos DDD válidos no Brasil
pub static DDD_CODES: Lazy<HashSet<u8>> = Lazy::new(|| {
    [
        11, 12, 13, 14, 15, 16, 17, 18, 19, // SP
        21, 22, 24, // RJ
        27, 28, // ES
        31, 32, 33, 34, 35, 37, 38, // MG
        41, 42, 43, 44, 45, 46, // PR
        47, 48, 49, // SC
        51, 53, 54, 55, // RS
        61, // DF
        62, 64, // GO
        63, // TO
        65, 66, // MT
        67, // MS
        68, // AC
        69, // RO
        71, 73, 74, 75, 77, // BA
        79, // SE
        81, 87, // PE
        82, // AL
        83, // PB
        84, // RN
        85, 88, // CE
        86, 89, // PI
        91, 93, 94, // PA
        92, 97, // AM
        95, // RR
        96, // AP
        98, 99, // MA
    ]
    .into_iter()
    .collect()
});

/// Siglas das 27 unidades federativas
pub static UF_CODES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "AC", "AL", "AP", "AM", "BA", "CE", "DF", "ES", "GO", "MA", "MT", "MS", "MG", "PA",
        "PB", "PR", "PE", "PI", "RJ", "RN", "RS", "RO", "RR", "SC", "SP", "SE", "TO",
    ]
    .into_iter()
    .collect()
});

/// Categorias profissionais aceitas no registro COREN
pub static COREN_CATEGORIES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "ENF", "TE", "AE", "EE", "RES", "ENFESF", "TENFESF", "ENFURG", "ENFADM", "ENFOB",
        "ENFPSI", "ENFPED", "ENFINT", "ENFVIS",
    ]
    .into_iter()
    .collect()
});

/// Verifica se o código DDD pertence à lista de códigos válidos
pub fn is_valid_ddd(code: u8) -> bool {
    DDD_CODES.contains(&code)
}

/// Verifica se a sigla (já em maiúsculas) é de uma UF existente
pub fn is_valid_uf(uf: &str) -> bool {
    UF_CODES.contains(uf)
}

/// Verifica se a categoria (já em maiúsculas) é uma categoria COREN válida
pub fn is_valid_coren_category(category: &str) -> bool {
    COREN_CATEGORIES.contains(category)
}
