//! Declarative field-candidate tables.
//!
//! One table per data type: `(semantic field, candidate substrings,
//! required)`. Candidates are bilingual and ordered by priority; a
//! column matches when a candidate is contained (case-insensitively)
//! in the column name. Substring containment is deliberate — export
//! tools add prefixes and suffixes around the meaningful part.

use sauna_model::{DataType, SemanticField};

/// One row of a candidate table.
#[derive(Debug, Clone, Copy)]
pub struct FieldPattern {
    pub field: SemanticField,
    /// Candidate substrings (lowercase), highest priority first.
    pub candidates: &'static [&'static str],
    pub required: bool,
}

const fn pattern(
    field: SemanticField,
    candidates: &'static [&'static str],
    required: bool,
) -> FieldPattern {
    FieldPattern {
        field,
        candidates,
        required,
    }
}

const MEMBERS: &[FieldPattern] = &[
    pattern(
        SemanticField::MemberId,
        &["member_id", "member id", "memberid", "メンバーid", "会員id", "会員番号"],
        true,
    ),
    pattern(SemanticField::Gender, &["gender", "sex", "性別"], false),
    pattern(
        SemanticField::AgeGroup,
        &["age_group", "age group", "年齢層", "年齢", "age"],
        false,
    ),
    pattern(
        SemanticField::Region,
        &["region", "地域", "都道府県", "住所"],
        false,
    ),
    pattern(
        SemanticField::JoinDate,
        &["join_date", "join date", "入会日", "プラン契約適用開始日", "契約開始"],
        false,
    ),
    pattern(
        SemanticField::Status,
        &["status", "ステータス", "状態"],
        false,
    ),
];

const UTILIZATION: &[FieldPattern] = &[
    pattern(
        SemanticField::Date,
        &["date", "日付", "レッスン日", "年月日"],
        true,
    ),
    pattern(
        SemanticField::Room,
        &["room", "ルーム", "部屋", "スペース名", "店舗"],
        true,
    ),
    pattern(
        SemanticField::OccupancyRate,
        &["occupancy_rate", "occupancy", "稼働率", "利用率", "rate"],
        false,
    ),
    pattern(
        SemanticField::ReservationCount,
        &["reservation_count", "総予約数", "予約数", "予約件数", "reservations"],
        false,
    ),
    pattern(
        SemanticField::Capacity,
        &["capacity", "スペース数", "定員", "枠数"],
        false,
    ),
    pattern(
        SemanticField::Status,
        &["status", "予約ステータス", "ステータス", "状態"],
        false,
    ),
    pattern(
        SemanticField::MemberId,
        &["member_id", "メンバーid", "会員id"],
        false,
    ),
];

const COMPETITORS: &[FieldPattern] = &[
    pattern(
        SemanticField::Name,
        &["name", "競合", "店舗名", "施設名", "名称"],
        true,
    ),
    pattern(
        SemanticField::HourlyRate,
        &["hourly_rate", "hourly", "料金", "単価", "価格"],
        true,
    ),
    pattern(
        SemanticField::Location,
        &["location", "住所", "所在地"],
        false,
    ),
    pattern(SemanticField::Area, &["area", "エリア"], false),
];

const FINANCE: &[FieldPattern] = &[
    pattern(SemanticField::Month, &["month", "年月", "月"], true),
    pattern(SemanticField::Sales, &["sales", "売上", "収入"], true),
    pattern(
        SemanticField::Costs,
        &["cost", "費用", "経費", "コスト"],
        true,
    ),
    pattern(
        SemanticField::MemberType,
        &["member_type", "会員種別", "種別"],
        false,
    ),
];

const SALES: &[FieldPattern] = &[
    pattern(
        SemanticField::Date,
        &["精算日時", "取引日", "date", "日時", "日付"],
        true,
    ),
    pattern(
        SemanticField::Amount,
        &["amount", "合計金額", "金額", "売上金額"],
        true,
    ),
    pattern(
        SemanticField::MemberType,
        &["member_type", "会員種別", "種別"],
        false,
    ),
    pattern(
        SemanticField::MemberId,
        &["member_id", "メンバーid", "会員id"],
        false,
    ),
    pattern(
        SemanticField::Item,
        &["item", "摘要", "商品", "品目"],
        false,
    ),
];

const RESERVATION: &[FieldPattern] = &[
    pattern(
        SemanticField::Date,
        &["受講日", "予約日", "reservation_date", "レッスン日", "date", "日付"],
        true,
    ),
    pattern(
        SemanticField::Status,
        &["予約ステータス", "status", "ステータス", "状態"],
        false,
    ),
    pattern(SemanticField::Ticket, &["ticket", "チケット"], false),
    pattern(
        SemanticField::Room,
        &["room", "ルーム", "店舗"],
        false,
    ),
    pattern(
        SemanticField::MemberId,
        &["member_id", "メンバーid", "会員id"],
        false,
    ),
    pattern(
        SemanticField::ReservationId,
        &["reservation_id", "予約id"],
        false,
    ),
];

/// Returns the candidate table for a concrete data type.
///
/// `Auto` has no table; resolve it via filename sniffing first.
#[must_use]
pub fn field_patterns(data_type: DataType) -> &'static [FieldPattern] {
    match data_type {
        DataType::Members => MEMBERS,
        DataType::Utilization => UTILIZATION,
        DataType::Competitors => COMPETITORS,
        DataType::Finance => FINANCE,
        DataType::Sales => SALES,
        DataType::Reservation => RESERVATION,
        DataType::Auto => &[],
    }
}
