//! Relevance Rules and Query Plans
//!
//! The ranking formula is a fixed table of weighted `LIKE` tests. The search
//! statement and the count statement are both generated from that table and
//! share one filter clause.
//!
//! Every rule is evaluated independently and the weights are summed, which
//! means a name that starts with the term collects both the prefix and the
//! contains weight (500 + 300).

/// Columns selected into a `VoterRecord`, in table order.
pub const RECORD_COLUMNS: [&str; 17] = [
    "id",
    "serial",
    "name_en",
    "name_ml",
    "guardian_en",
    "guardian_ml",
    "house_no",
    "house_name_en",
    "house_name_ml",
    "gender",
    "age",
    "voter_id",
    "ward",
    "ward_name",
    "polling_station",
    "district",
    "local_body",
];

/// Text fields a row must contain the term in (at least one) to qualify.
pub const SEARCHABLE_COLUMNS: [&str; 7] = [
    "name_en",
    "name_ml",
    "voter_id",
    "house_name_en",
    "house_name_ml",
    "guardian_en",
    "guardian_ml",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// Column starts with the term.
    Prefix,
    /// Column contains the term anywhere.
    Contains,
}

#[derive(Debug, Clone, Copy)]
pub struct ScoringRule {
    pub column: &'static str,
    pub kind: MatchKind,
    pub weight: i64,
}

const fn rule(column: &'static str, kind: MatchKind, weight: i64) -> ScoringRule {
    ScoringRule {
        column,
        kind,
        weight,
    }
}

pub const SCORING_RULES: [ScoringRule; 9] = [
    rule("name_en", MatchKind::Prefix, 500),
    rule("name_ml", MatchKind::Prefix, 500),
    rule("name_en", MatchKind::Contains, 300),
    rule("name_ml", MatchKind::Contains, 300),
    rule("voter_id", MatchKind::Contains, 200),
    rule("house_name_en", MatchKind::Contains, 100),
    rule("house_name_ml", MatchKind::Contains, 100),
    rule("guardian_en", MatchKind::Contains, 50),
    rule("guardian_ml", MatchKind::Contains, 50),
];

/// What gets bound to each `?` placeholder of a generated statement, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Prefix,
    Contains,
    Ward,
    Limit,
    Offset,
}

/// A generated statement plus its positional bind layout.
#[derive(Debug, Clone)]
pub struct QueryPlan {
    pub sql: String,
    pub slots: Vec<Slot>,
}

/// How user text is turned into `LIKE` patterns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchOptions {
    /// Escape `%`, `_` and `\` so they match themselves instead of acting as wildcards.
    pub literal_wildcards: bool,
}

impl MatchOptions {
    pub fn prefix_pattern(&self, term: &str) -> String {
        format!("{}%", self.escape(term))
    }

    pub fn contains_pattern(&self, term: &str) -> String {
        format!("%{}%", self.escape(term))
    }

    fn escape(&self, term: &str) -> String {
        if !self.literal_wildcards {
            return term.to_string();
        }

        let mut escaped = String::with_capacity(term.len());
        for c in term.chars() {
            if matches!(c, '%' | '_' | '\\') {
                escaped.push('\\');
            }
            escaped.push(c);
        }
        escaped
    }

    fn like(&self, column: &str) -> String {
        if self.literal_wildcards {
            format!(r"{} LIKE ? ESCAPE '\'", column)
        } else {
            format!("{} LIKE ?", column)
        }
    }

    /// Builds the scored, ordered and windowed search statement.
    pub fn search_plan(&self) -> QueryPlan {
        let mut slots = Vec::new();

        let score = SCORING_RULES
            .iter()
            .map(|rule| {
                slots.push(match rule.kind {
                    MatchKind::Prefix => Slot::Prefix,
                    MatchKind::Contains => Slot::Contains,
                });
                format!(
                    "CASE WHEN {} THEN {} ELSE 0 END",
                    self.like(rule.column),
                    rule.weight
                )
            })
            .collect::<Vec<_>>()
            .join(" + ");

        let columns = RECORD_COLUMNS.join(", ");
        let filter = self.filter_clause(&mut slots);
        slots.push(Slot::Limit);
        slots.push(Slot::Offset);

        let sql = format!(
            "SELECT {columns}, ({score}) AS score FROM voters WHERE {filter} \
             ORDER BY score DESC, name_en ASC LIMIT ? OFFSET ?"
        );

        QueryPlan { sql, slots }
    }

    /// Builds the statement counting every row the search statement would match.
    pub fn count_plan(&self) -> QueryPlan {
        let mut slots = Vec::new();
        let filter = self.filter_clause(&mut slots);

        QueryPlan {
            sql: format!("SELECT COUNT(*) AS total FROM voters WHERE {filter}"),
            slots,
        }
    }

    fn filter_clause(&self, slots: &mut Vec<Slot>) -> String {
        let any_field = SEARCHABLE_COLUMNS
            .iter()
            .map(|column| {
                slots.push(Slot::Contains);
                self.like(column)
            })
            .collect::<Vec<_>>()
            .join(" OR ");

        slots.push(Slot::Ward);
        slots.push(Slot::Ward);

        format!("({any_field}) AND (? = '' OR ward = ?)")
    }
}
