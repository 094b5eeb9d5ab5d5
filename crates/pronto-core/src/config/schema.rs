use serde::{Deserialize, Serialize};

/// Header labels accepted for one column. Labels are compared after
/// `normalize_text`, so they may be written with accents and ordinals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeaderLabels {
    /// The normalized cell must equal one of these.
    #[serde(default)]
    pub exact: Vec<String>,
    /// The normalized cell must contain one of these.
    #[serde(default)]
    pub contains: Vec<String>,
}

impl HeaderLabels {
    pub fn is_empty(&self) -> bool {
        self.exact.is_empty() && self.contains.is_empty()
    }
}

/// Tunables for reading one family of attendance reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Max vertical distance (page units) for a fragment to join an existing row.
    pub row_tolerance: f32,
    /// How many reconstructed rows are searched for the header.
    pub header_search_rows: usize,
    /// Names with fewer non-space characters are never matched or created.
    pub min_name_len: usize,
    pub name_labels: HeaderLabels,
    pub entry_labels: HeaderLabels,
    /// Whole words that mark a name cell as report furniture (page footers, repeated headers).
    pub metadata_markers: Vec<String>,
    pub imported_id_prefix: String,
    pub imported_sector: String,
    /// Worksheet to read from spreadsheets. Defaults to the first sheet.
    pub sheet: Option<String>,
}

impl Default for ImportConfig {
    fn default() -> Self {
        ImportConfig {
            row_tolerance: 8.0,
            header_search_rows: 80,
            min_name_len: 5,
            name_labels: HeaderLabels {
                exact: vec!["NOME".into()],
                contains: vec!["FUNCIONÁRIO".into()],
            },
            entry_labels: HeaderLabels {
                exact: vec![],
                contains: vec![
                    "1º ENTRADA".into(),
                    "1O ENTRADA".into(),
                    "1A ENTRADA".into(),
                    "PRIMEIRA ENTRADA".into(),
                ],
            },
            metadata_markers: [
                "FUNCIONARIO",
                "NOME",
                "PAGINA",
                "TOTAL",
                "RELATORIO",
                "EMPRESA",
                "CNPJ",
                "PERIODO",
                "DATA",
                "EMISSAO",
                "ASSINATURA",
                "DEPARTAMENTO",
                "SETOR",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            imported_id_prefix: "IMP-".into(),
            imported_sector: "IMPORTADO".into(),
            sheet: None,
        }
    }
}
