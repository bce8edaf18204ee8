//! Static keyword and builtin table

use serde::Serialize;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Semantic role of a reserved spelling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolRole {
    ControlFlow,
    Definition,
    Literal,
    LogicalOperator,
    Exception,
    Import,
    Builtin,
    Other,
}

impl SymbolRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            SymbolRole::ControlFlow => "control_flow",
            SymbolRole::Definition => "definition",
            SymbolRole::Literal => "literal",
            SymbolRole::LogicalOperator => "logical_operator",
            SymbolRole::Exception => "exception",
            SymbolRole::Import => "import",
            SymbolRole::Builtin => "builtin",
            SymbolRole::Other => "other",
        }
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self, SymbolRole::Builtin)
    }
}

impl std::fmt::Display for SymbolRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One reserved spelling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SymbolEntry {
    pub spelling: &'static str,
    pub role: SymbolRole,
    /// Gloss shown next to completion candidates
    pub display_hint: Option<&'static str>,
    /// The identifier that follows this keyword names a new binding
    pub binds_identifier: bool,
}

/// Detail text for builtins that carry no specific gloss
pub const BUILTIN_FALLBACK_HINT: &str = "פונקציה מובנית";

// (spelling, role, hint, binds_identifier)
const KEYWORDS: &[(&str, SymbolRole, &str, bool)] = &[
    // Control flow
    ("אם", SymbolRole::ControlFlow, "if - תנאי", false),
    ("אחרת", SymbolRole::ControlFlow, "else - אחרת", false),
    ("אחרת_אם", SymbolRole::ControlFlow, "elif - אחרת אם", false),
    ("כל_עוד", SymbolRole::ControlFlow, "while - לולאת כל עוד", false),
    ("לכל", SymbolRole::ControlFlow, "for - לולאת לכל", true),
    ("ב", SymbolRole::ControlFlow, "in - בתוך", false),
    ("עצור", SymbolRole::ControlFlow, "break - עצור לולאה", false),
    ("המשך", SymbolRole::ControlFlow, "continue - המשך לולאה", false),
    ("העבר", SymbolRole::ControlFlow, "pass - העבר", false),
    // Definitions
    ("פונקציה", SymbolRole::Definition, "def - הגדרת פונקציה", true),
    ("מחלקה", SymbolRole::Definition, "class - הגדרת מחלקה", true),
    ("החזר", SymbolRole::Definition, "return - החזר ערך", false),
    ("למבדה", SymbolRole::Definition, "lambda - פונקציה אנונימית", false),
    // Literals
    ("אמת", SymbolRole::Literal, "True - ערך אמת", false),
    ("שקר", SymbolRole::Literal, "False - ערך שקר", false),
    ("כלום", SymbolRole::Literal, "None - ערך ריק", false),
    // Logical operators
    ("וגם", SymbolRole::LogicalOperator, "and - וגם", false),
    ("או", SymbolRole::LogicalOperator, "or - או", false),
    ("לא", SymbolRole::LogicalOperator, "not - לא", false),
    // Exceptions
    ("נסה", SymbolRole::Exception, "try - נסה", false),
    ("תפוס", SymbolRole::Exception, "except - תפוס שגיאה", false),
    ("לבסוף", SymbolRole::Exception, "finally - לבסוף", false),
    ("זרוק", SymbolRole::Exception, "raise - זרוק שגיאה", false),
    ("טען", SymbolRole::Exception, "assert - טען", false),
    // Imports
    ("ייבא", SymbolRole::Import, "import - ייבא", true),
    ("מ", SymbolRole::Import, "from - מ", false),
    // Other
    ("עצמי", SymbolRole::Other, "self - התייחסות עצמית", false),
    ("עם", SymbolRole::Other, "with - עם", false),
    ("כ", SymbolRole::Other, "as - כ", true),
    ("גלובלי", SymbolRole::Other, "global - משתנה גלובלי", true),
];

// (spelling, hint)
const BUILTINS: &[(&str, Option<&str>)] = &[
    ("הדפס", Some("print - הדפס")),
    ("קלט", Some("input - קלט")),
    ("אורך", Some("len - אורך")),
    ("טיפוס", Some("type - טיפוס")),
    ("בטווח", Some("range - טווח מספרים")),
    ("מספר_שלם", Some("int - מספר שלם")),
    ("מספר_עשרוני", Some("float - מספר עשרוני")),
    ("מחרוזת", Some("str - מחרוזת")),
    ("רשימה", Some("list - רשימה")),
    ("מילון", Some("dict - מילון")),
    ("קבוצה", Some("set - קבוצה")),
    ("סכום", None),
    ("מינימום", None),
    ("מקסימום", None),
    ("ממוין", None),
    ("הפוך", None),
    ("כל", None),
    ("כלשהו", None),
    ("מפה", None),
    ("סנן", None),
    ("צמצם", None),
    ("פתח", None),
    ("קרא", None),
    ("כתוב", None),
    ("סגור", None),
    ("הוסף", None),
    ("הכנס", None),
    ("הסר", None),
    ("מחק", None),
    ("נקה", None),
];

/// Immutable lookup structure shared by every tokenizer and completion request.
///
/// Lookups are exact-match. Iteration order is insertion order: keywords first,
/// then builtins.
#[derive(Debug)]
pub struct SymbolTable {
    entries: Vec<SymbolEntry>,
    index: HashMap<&'static str, usize>,
}

static GLOBAL_TABLE: OnceLock<SymbolTable> = OnceLock::new();

impl SymbolTable {
    /// The process-wide table, built on first use
    pub fn global() -> &'static SymbolTable {
        GLOBAL_TABLE.get_or_init(SymbolTable::build)
    }

    fn build() -> Self {
        let keywords = KEYWORDS
            .iter()
            .map(|&(spelling, role, hint, binds_identifier)| SymbolEntry {
                spelling,
                role,
                display_hint: Some(hint),
                binds_identifier,
            });
        let builtins = BUILTINS.iter().map(|&(spelling, hint)| SymbolEntry {
            spelling,
            role: SymbolRole::Builtin,
            display_hint: hint,
            binds_identifier: false,
        });

        let mut entries = Vec::with_capacity(KEYWORDS.len() + BUILTINS.len());
        let mut index = HashMap::with_capacity(KEYWORDS.len() + BUILTINS.len());
        for entry in keywords.chain(builtins) {
            // First spelling wins; the tables above contain no duplicates.
            if index.contains_key(entry.spelling) {
                continue;
            }
            index.insert(entry.spelling, entries.len());
            entries.push(entry);
        }

        Self { entries, index }
    }

    pub fn lookup(&self, spelling: &str) -> Option<&SymbolEntry> {
        self.index.get(spelling).map(|&i| &self.entries[i])
    }

    /// All entries in stable insertion order
    pub fn all_entries(&self) -> &[SymbolEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries of one role, in table order
    pub fn entries_with_role(&self, role: SymbolRole) -> impl Iterator<Item = &SymbolEntry> {
        self.entries.iter().filter(move |e| e.role == role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_exact_match() {
        let table = SymbolTable::global();

        let entry = table.lookup("אם").unwrap();
        assert_eq!(entry.role, SymbolRole::ControlFlow);
        assert_eq!(entry.display_hint, Some("if - תנאי"));

        assert!(table.lookup("א").is_none());
        assert!(table.lookup("אמ").is_none());
        assert!(table.lookup("אם ").is_none());
        assert!(table.lookup("if").is_none());
    }

    #[test]
    fn test_spellings_are_unique() {
        let table = SymbolTable::global();
        assert_eq!(table.len(), KEYWORDS.len() + BUILTINS.len());

        let mut seen = std::collections::HashSet::new();
        for entry in table.all_entries() {
            assert!(seen.insert(entry.spelling), "duplicate {}", entry.spelling);
        }
    }

    #[test]
    fn test_every_required_role_is_present() {
        let table = SymbolTable::global();
        for role in [
            SymbolRole::ControlFlow,
            SymbolRole::Definition,
            SymbolRole::Literal,
            SymbolRole::LogicalOperator,
            SymbolRole::Exception,
            SymbolRole::Import,
            SymbolRole::Builtin,
        ] {
            assert!(
                table.entries_with_role(role).next().is_some(),
                "no entries for {}",
                role
            );
        }

        let literals: Vec<_> = table
            .entries_with_role(SymbolRole::Literal)
            .map(|e| e.spelling)
            .collect();
        assert_eq!(literals, vec!["אמת", "שקר", "כלום"]);
    }

    #[test]
    fn test_insertion_order_keywords_before_builtins() {
        let entries = SymbolTable::global().all_entries();
        assert_eq!(entries[0].spelling, "אם");

        let first_builtin = entries.iter().position(|e| e.role.is_builtin()).unwrap();
        assert!(entries[first_builtin..].iter().all(|e| e.role.is_builtin()));
        assert_eq!(entries[first_builtin].spelling, "הדפס");
    }

    #[test]
    fn test_binding_keywords() {
        let table = SymbolTable::global();
        for spelling in ["פונקציה", "מחלקה", "לכל", "כ", "ייבא", "גלובלי"] {
            assert!(table.lookup(spelling).unwrap().binds_identifier, "{}", spelling);
        }
        assert!(!table.lookup("אם").unwrap().binds_identifier);
        assert!(!table.lookup("הדפס").unwrap().binds_identifier);
    }
}
