// src/specs/fields.rs
//! Lot record schema and the label synonyms that feed it.

use crate::error::Result;
use crate::specs::labels::LabelSet;

/// Report columns, in output order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    LotNumber,
    Title,
    Address,
    StartPrice,
    BidStep,
    Deposit,
    ApplicationsFrom,
    ApplicationsTo,
    Status,
    Debtor,
    Documents,
    Description,
    Url,
}

impl Field {
    pub const ALL: [Field; 13] = [
        Field::LotNumber,
        Field::Title,
        Field::Address,
        Field::StartPrice,
        Field::BidStep,
        Field::Deposit,
        Field::ApplicationsFrom,
        Field::ApplicationsTo,
        Field::Status,
        Field::Debtor,
        Field::Documents,
        Field::Description,
        Field::Url,
    ];

    pub fn header(self) -> &'static str {
        match self {
            Field::LotNumber => "Номер лота",
            Field::Title => "Название/Описание",
            Field::Address => "Адрес объекта",
            Field::StartPrice => "Начальная цена",
            Field::BidStep => "Шаг аукциона",
            Field::Deposit => "Размер задатка",
            Field::ApplicationsFrom => "Начало приема заявок",
            Field::ApplicationsTo => "Окончание приема заявок",
            Field::Status => "Статус аукциона",
            Field::Debtor => "Информация о должнике",
            Field::Documents => "Ссылка на документацию",
            Field::Description => "Полное описание",
            Field::Url => "Ссылка на лот",
        }
    }
}

pub fn headers() -> Vec<String> {
    Field::ALL.iter().map(|f| s!(f.header())).collect()
}

/// One scraped lot. `None` means "no data" and only becomes `""` in
/// `to_row`, at the report boundary.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LotRecord {
    pub lot_number: Option<String>,
    pub title: Option<String>,
    pub address: Option<String>,
    pub start_price: Option<String>,
    pub bid_step: Option<String>,
    pub deposit: Option<String>,
    pub applications_from: Option<String>,
    pub applications_to: Option<String>,
    pub status: Option<String>,
    pub debtor: Option<String>,
    /// Newline-joined absolute document URLs.
    pub documents: Option<String>,
    pub description: Option<String>,
    pub url: String,
}

impl LotRecord {
    pub fn get(&self, field: Field) -> Option<&str> {
        let v = match field {
            Field::LotNumber => &self.lot_number,
            Field::Title => &self.title,
            Field::Address => &self.address,
            Field::StartPrice => &self.start_price,
            Field::BidStep => &self.bid_step,
            Field::Deposit => &self.deposit,
            Field::ApplicationsFrom => &self.applications_from,
            Field::ApplicationsTo => &self.applications_to,
            Field::Status => &self.status,
            Field::Debtor => &self.debtor,
            Field::Documents => &self.documents,
            Field::Description => &self.description,
            Field::Url => return Some(self.url.as_str()),
        };
        v.as_deref()
    }

    /// Display row, one cell per `Field::ALL`, absent values as `""`.
    pub fn to_row(&self) -> Vec<String> {
        Field::ALL
            .iter()
            .map(|f| self.get(*f).unwrap_or_default().to_string())
            .collect()
    }
}

/// Label synonyms per resolvable field, in priority order.
#[derive(Clone, Debug)]
pub struct FieldLabels {
    pub lot_number: LabelSet,
    pub address: LabelSet,
    pub start_price: LabelSet,
    pub bid_step: LabelSet,
    pub deposit: LabelSet,
    pub applications_from: LabelSet,
    pub applications_to: LabelSet,
    pub status: LabelSet,
    pub debtor_name: LabelSet,
    pub debtor_inn: LabelSet,
}

impl FieldLabels {
    /// Labels as the site prints them today.
    pub fn standard() -> Result<Self> {
        Ok(Self {
            lot_number: LabelSet::new(&["Номер лота", "Лот", "Лот №"])?,
            address: LabelSet::new(&["Адрес"])?,
            start_price: LabelSet::new(&["Начальная цена"])?,
            bid_step: LabelSet::new(&["Шаг повышения", "Шаг аукциона", "Шаг"])?,
            deposit: LabelSet::new(&["Задаток", "Размер задатка"])?,
            applications_from: LabelSet::new(&["Прием заявок с", "Приём заявок с"])?,
            applications_to: LabelSet::new(&["Прием заявок до", "Приём заявок до"])?,
            status: LabelSet::new(&["Статус"])?,
            debtor_name: LabelSet::new(&["Наименование", "Должник"])?,
            debtor_inn: LabelSet::new(&["ИНН"])?,
        })
    }
}
