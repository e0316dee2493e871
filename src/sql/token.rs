//! Token types for the SQL lexer
use phf::phf_map;

// Perfect hash map for O(1) keyword lookup. Every word of the source
// language is reserved here, including the ones the grammar never consumes
// (USE, DESC, UNIQUE, ...), so they can never be used as identifiers.
static KEYWORDS: phf::Map<&'static str, TokenType> = phf_map! {
    "databases" => TokenType::Databases,
    "database" => TokenType::Database,
    "tables" => TokenType::Tables,
    "table" => TokenType::Table,
    "show" => TokenType::Show,
    "create" => TokenType::Create,
    "drop" => TokenType::Drop,
    "use" => TokenType::Use,
    "desc" => TokenType::Desc,
    "insert" => TokenType::Insert,
    "into" => TokenType::Into,
    "delete" => TokenType::Delete,
    "from" => TokenType::From,
    "select" => TokenType::Select,
    "update" => TokenType::Update,
    "unique" => TokenType::Unique,
    "primary" => TokenType::Primary,
    "key" => TokenType::Key,
    "default" => TokenType::Default,
    "check" => TokenType::Check,
    "not" => TokenType::Not,
    "and" => TokenType::And,
    "or" => TokenType::Or,
    "if" => TokenType::If,
    "exists" => TokenType::Exists,
    "values" => TokenType::Values,
    "distinct" => TokenType::Distinct,
    "all" => TokenType::All,
    "where" => TokenType::Where,
    "set" => TokenType::Set,
    "in" => TokenType::In,
    "is" => TokenType::Is,
    "char" => TokenType::Char,
    "varchar" => TokenType::Varchar,
    "int" => TokenType::Int,
    "float" => TokenType::Float,
    "null" => TokenType::Null,
};

#[derive(Debug, Clone, PartialEq)]
pub enum TokenType {
    // Keywords
    Databases,
    Database,
    Tables,
    Table,
    Show,
    Create,
    Drop,
    Use,
    Desc,
    Insert,
    Into,
    Delete,
    From,
    Select,
    Update,
    Unique,
    Primary,
    Key,
    Default,
    Check,
    Not,
    And,
    Or,
    If,
    Exists,
    Values,
    Distinct,
    All,
    Where,
    Set,
    In,
    Is,

    // Type keywords
    Char,
    Varchar,
    Int,
    Float,
    Null,

    // Operators
    Eq,    // =
    Ne,    // <>
    Lt,    // <
    Gt,    // >
    Le,    // <=
    Ge,    // >=
    Plus,  // +
    Minus, // -
    Star,  // *
    Slash, // /

    // Delimiters
    LParen,    // (
    RParen,    // )
    Comma,     // ,
    Semicolon, // ;

    // Literals
    IntNumber(i64),
    FloatNumber(f64),
    String(String),
    Identifier(String),

    // Special
    Eof,
}

#[derive(Debug, Clone)]
pub struct Token {
    pub token_type: TokenType,
    pub line: usize,
    pub column: usize,
}

impl Token {
    pub fn new(token_type: TokenType, line: usize, column: usize) -> Self {
        Self {
            token_type,
            line,
            column,
        }
    }
}

impl TokenType {
    /// Case-insensitive reserved-word lookup.
    pub fn from_keyword(s: &str) -> Option<Self> {
        let lowercase = s.to_lowercase();
        KEYWORDS.get(lowercase.as_str()).cloned()
    }
}
