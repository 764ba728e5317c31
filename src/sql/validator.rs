//! SELECT statement validation and canonicalization.
//!
//! Raw text is parsed with `sqlparser`'s generic dialect. Only a single plain
//! `SELECT` is accepted; it comes back re-rendered by the grammar's printer
//! (uppercase keywords, normalized whitespace). Everything else is reported
//! as a value, never as a panic or an error that escapes this module.
//!
//! The grammar builds operator chains (`a + b + c`, `x UNION y UNION z`) as
//! left-deep trees, and printing or dropping one recurses once per operator.
//! Payloads are therefore screened on their token stream before parsing, and
//! a canonical rendering is only handed out after it parses back to the same
//! statement.

use sqlparser::ast::{SetExpr, Statement};
use sqlparser::dialect::GenericDialect;
use sqlparser::keywords::{Keyword, ALL_KEYWORDS};
use sqlparser::parser::Parser;
use sqlparser::tokenizer::{Token, Tokenizer};

/// Leading keywords kept when naming a rejected statement (`CREATE TABLE`).
const KIND_KEYWORDS: usize = 2;

/// Most operators accepted in one payload; bounds the depth of the tree.
pub const MAX_OPERATORS: usize = 128;

/// Result of validating one payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    /// A plain SELECT in its canonical rendering.
    Canonical(String),
    /// The text is not valid SQL; carries the parser diagnostic.
    ParseFailure(String),
    /// Valid SQL, but not a single plain SELECT.
    Rejected(String),
}

impl ValidationOutcome {
    /// Stable label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationOutcome::Canonical(_) => "canonical",
            ValidationOutcome::ParseFailure(_) => "parse_failure",
            ValidationOutcome::Rejected(_) => "rejected",
        }
    }

    /// Text sent back to the client.
    pub fn into_message(self) -> String {
        match self {
            ValidationOutcome::Canonical(sql) => sql,
            ValidationOutcome::ParseFailure(msg) => format!("Error parsing SQL: {msg}"),
            ValidationOutcome::Rejected(reason) => format!("Invalid SQL statement: {reason}"),
        }
    }
}

/// Validate `raw` as a single plain SELECT statement.
pub fn validate(raw: &str) -> ValidationOutcome {
    let operators = count_operators(raw);
    if operators > MAX_OPERATORS {
        return ValidationOutcome::Rejected(format!(
            "statement is too complex: {operators} operators, at most {MAX_OPERATORS} are supported"
        ));
    }

    let mut statements = match Parser::parse_sql(&GenericDialect {}, raw) {
        Ok(statements) => statements,
        Err(e) => return ValidationOutcome::ParseFailure(e.to_string()),
    };

    match statements.len() {
        0 => return ValidationOutcome::Rejected("empty statement".to_string()),
        1 => {}
        n => {
            return ValidationOutcome::Rejected(format!(
                "expected a single statement, found {n}"
            ))
        }
    }

    let statement = statements.remove(0);
    if let Err(reason) = check_plain_select(&statement) {
        return ValidationOutcome::Rejected(reason);
    }

    let canonical = statement.to_string();
    if !renders_faithfully(&statement, &canonical) {
        return ValidationOutcome::Rejected(format!(
            "statement has no unambiguous canonical form (renders as {canonical:?})"
        ));
    }
    ValidationOutcome::Canonical(canonical)
}

/// Count tokens that chain two operands together.
///
/// Tokenizer failures count as zero; the parser reports them properly.
fn count_operators(raw: &str) -> usize {
    let dialect = GenericDialect {};
    let Ok(tokens) = Tokenizer::new(&dialect, raw).tokenize() else {
        return 0;
    };
    tokens.iter().filter(|token| is_operator(token)).count()
}

fn is_operator(token: &Token) -> bool {
    match token {
        Token::Word(word) => matches!(
            word.keyword,
            Keyword::AND
                | Keyword::OR
                | Keyword::XOR
                | Keyword::IS
                | Keyword::LIKE
                | Keyword::ILIKE
                | Keyword::BETWEEN
                | Keyword::IN
                | Keyword::COLLATE
                | Keyword::AT
                | Keyword::SIMILAR
                | Keyword::REGEXP
                | Keyword::RLIKE
                | Keyword::DIV
                | Keyword::OVERLAPS
                | Keyword::UNION
                | Keyword::INTERSECT
                | Keyword::EXCEPT
        ),
        Token::EOF
        | Token::Whitespace(_)
        | Token::Number(..)
        | Token::Char(_)
        | Token::Placeholder(_)
        | Token::Comma
        | Token::LParen
        | Token::RParen
        | Token::Period
        | Token::SemiColon
        | Token::SingleQuotedString(_)
        | Token::DoubleQuotedString(_)
        | Token::TripleSingleQuotedString(_)
        | Token::TripleDoubleQuotedString(_)
        | Token::DollarQuotedString(_)
        | Token::SingleQuotedByteStringLiteral(_)
        | Token::DoubleQuotedByteStringLiteral(_)
        | Token::TripleSingleQuotedByteStringLiteral(_)
        | Token::TripleDoubleQuotedByteStringLiteral(_)
        | Token::SingleQuotedRawStringLiteral(_)
        | Token::DoubleQuotedRawStringLiteral(_)
        | Token::TripleSingleQuotedRawStringLiteral(_)
        | Token::TripleDoubleQuotedRawStringLiteral(_)
        | Token::NationalStringLiteral(_)
        | Token::EscapedStringLiteral(_)
        | Token::UnicodeStringLiteral(_)
        | Token::HexStringLiteral(_) => false,
        _ => true,
    }
}

/// The rendering must parse back to the statement it came from.
fn renders_faithfully(statement: &Statement, rendered: &str) -> bool {
    match Parser::parse_sql(&GenericDialect {}, rendered) {
        Ok(reparsed) => reparsed.len() == 1 && reparsed[0] == *statement,
        Err(_) => false,
    }
}

fn check_plain_select(statement: &Statement) -> Result<(), String> {
    let query = match statement {
        Statement::Query(query) => query,
        other => {
            return Err(format!(
                "{} statements are not supported, only SELECT",
                statement_kind(other)
            ))
        }
    };

    match query.body.as_ref() {
        SetExpr::Select(select) if select.into.is_some() => {
            Err("SELECT INTO creates a table and is not supported".to_string())
        }
        SetExpr::Select(_) => Ok(()),
        SetExpr::SetOperation { op, .. } => Err(format!(
            "{op} of queries is not supported, only a plain SELECT"
        )),
        SetExpr::Values(_) => Err("VALUES lists are not supported, only a plain SELECT".to_string()),
        SetExpr::Query(_) => {
            Err("parenthesized queries are not supported, only a plain SELECT".to_string())
        }
        SetExpr::Table(_) => Err("TABLE queries are not supported, only a plain SELECT".to_string()),
        _ => Err("only a plain SELECT is supported".to_string()),
    }
}

/// Name a statement by the leading keywords of its rendering.
fn statement_kind(statement: &Statement) -> String {
    let rendered = statement.to_string();
    let kind = rendered
        .split_whitespace()
        .take(KIND_KEYWORDS)
        .take_while(|word| ALL_KEYWORDS.contains(word))
        .collect::<Vec<_>>()
        .join(" ");

    if kind.is_empty() {
        "non-SELECT".to_string()
    } else {
        kind
    }
}
