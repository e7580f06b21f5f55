//! Language definitions
//!
//! A [`LanguageDefinition`] is plain configuration: word lists, comment
//! delimiters and an ordered list of regex token rules. It is compiled into a
//! [`CompiledLanguage`] when installed on an editor, which is where malformed
//! patterns are reported.

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

use regex::bytes::Regex;
use serde::Deserialize;
use thiserror::Error;

use super::tokenizer::{CStyleTokenizer, Tokenizer};
use crate::theme::PaletteIndex;

/// Built-in language ids accepted by [`LanguageDefinition::by_id`]
pub const BUILTIN_LANGUAGES: &[&str] = &["glsl", "c", "cpp", "lua"];

/// Errors raised while loading or compiling a language definition
#[derive(Debug, Error)]
pub enum LanguageError {
    #[error("invalid token rule `{pattern}`: {source}")]
    InvalidRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("failed to parse language definition: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("unknown built-in language: {0}")]
    UnknownBuiltin(String),
}

/// One `(pattern, color)` entry of the ordered rule list
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenRule {
    pub pattern: String,
    pub color: PaletteIndex,
}

impl TokenRule {
    pub fn new(pattern: &str, color: PaletteIndex) -> Self {
        Self {
            pattern: pattern.to_string(),
            color,
        }
    }
}

/// Per-language highlighting configuration.
///
/// `identifiers` and `preproc_identifiers` map a word to the declaration
/// text a host may show as a tooltip.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct LanguageDefinition {
    pub name: String,
    pub keywords: BTreeSet<String>,
    pub identifiers: BTreeMap<String, String>,
    pub preproc_identifiers: BTreeMap<String, String>,
    pub comment_start: String,
    pub comment_end: String,
    pub single_line_comment: String,
    pub preproc_char: Option<char>,
    pub case_sensitive: bool,
    pub auto_indentation: bool,
    pub token_rules: Vec<TokenRule>,
    /// Native tokenizer tried before `token_rules`
    #[serde(skip)]
    pub tokenizer: Option<Arc<dyn Tokenizer>>,
}

impl Default for LanguageDefinition {
    fn default() -> Self {
        Self {
            name: String::new(),
            keywords: BTreeSet::new(),
            identifiers: BTreeMap::new(),
            preproc_identifiers: BTreeMap::new(),
            comment_start: String::new(),
            comment_end: String::new(),
            single_line_comment: String::new(),
            preproc_char: Some('#'),
            case_sensitive: true,
            auto_indentation: true,
            token_rules: Vec::new(),
            tokenizer: None,
        }
    }
}

impl fmt::Debug for LanguageDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LanguageDefinition")
            .field("name", &self.name)
            .field("keywords", &self.keywords.len())
            .field("identifiers", &self.identifiers.len())
            .field("preproc_identifiers", &self.preproc_identifiers.len())
            .field("comment_start", &self.comment_start)
            .field("comment_end", &self.comment_end)
            .field("single_line_comment", &self.single_line_comment)
            .field("preproc_char", &self.preproc_char)
            .field("case_sensitive", &self.case_sensitive)
            .field("auto_indentation", &self.auto_indentation)
            .field("token_rules", &self.token_rules.len())
            .field("tokenizer", &self.tokenizer.is_some())
            .finish()
    }
}

impl LanguageDefinition {
    /// Parse a definition from YAML. The native tokenizer cannot be
    /// expressed in YAML and is always `None`.
    pub fn from_yaml(yaml: &str) -> Result<Self, LanguageError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Look up a built-in definition (`glsl`, `c`, `cpp`, `lua`)
    pub fn by_id(id: &str) -> Result<Self, LanguageError> {
        match id.to_ascii_lowercase().as_str() {
            "glsl" => Ok(Self::glsl()),
            "c" => Ok(Self::c()),
            "cpp" | "c++" => Ok(Self::cpp()),
            "lua" => Ok(Self::lua()),
            other => Err(LanguageError::UnknownBuiltin(other.to_string())),
        }
    }

    /// No rules, no comments: everything stays `Default`
    pub fn plain_text() -> Self {
        Self {
            name: "Plain Text".to_string(),
            preproc_char: None,
            auto_indentation: false,
            ..Self::default()
        }
    }

    pub fn glsl() -> Self {
        Self {
            name: "GLSL".to_string(),
            keywords: words(C_KEYWORDS.iter().chain(GLSL_KEYWORDS)),
            identifiers: declarations(GLSL_BUILTINS, "Built-in function"),
            comment_start: "/*".to_string(),
            comment_end: "*/".to_string(),
            single_line_comment: "//".to_string(),
            token_rules: c_like_rules(),
            ..Self::default()
        }
    }

    pub fn c() -> Self {
        Self {
            name: "C".to_string(),
            keywords: words(C_KEYWORDS),
            identifiers: declarations(C_LIBRARY, "Standard library function"),
            comment_start: "/*".to_string(),
            comment_end: "*/".to_string(),
            single_line_comment: "//".to_string(),
            tokenizer: Some(Arc::new(CStyleTokenizer)),
            ..Self::default()
        }
    }

    pub fn cpp() -> Self {
        Self {
            name: "C++".to_string(),
            keywords: words(C_KEYWORDS.iter().chain(CPP_KEYWORDS)),
            identifiers: declarations(C_LIBRARY.iter().chain(CPP_LIBRARY), "Standard library"),
            ..Self::c()
        }
    }

    pub fn lua() -> Self {
        Self {
            name: "Lua".to_string(),
            keywords: words(LUA_KEYWORDS),
            identifiers: declarations(LUA_LIBRARY, "Built-in function"),
            comment_start: "--[[".to_string(),
            comment_end: "]]".to_string(),
            single_line_comment: "--".to_string(),
            preproc_char: None,
            token_rules: vec![
                TokenRule::new(r#""(\\.|[^"])*""#, PaletteIndex::String),
                TokenRule::new(r"'(\\.|[^'])*'", PaletteIndex::String),
                TokenRule::new(r"0[xX][0-9a-fA-F]+", PaletteIndex::Number),
                TokenRule::new(
                    r"([0-9]+([.][0-9]*)?|[.][0-9]+)([eE][+-]?[0-9]+)?",
                    PaletteIndex::Number,
                ),
                TokenRule::new(r"[a-zA-Z_][a-zA-Z0-9_]*", PaletteIndex::Identifier),
                TokenRule::new(
                    r"[\[\]\{\}!%\^&\*\(\)\-\+=~\|<>\?/;,\.:#]",
                    PaletteIndex::Punctuation,
                ),
            ],
            ..Self::default()
        }
    }

    /// Compile the rule list and normalise the word lists
    pub fn compile(self: Arc<Self>) -> Result<CompiledLanguage, LanguageError> {
        let rules = self
            .token_rules
            .iter()
            .map(|rule| {
                Regex::new(&format!("^(?:{})", rule.pattern))
                    .map(|regex| (regex, rule.color))
                    .map_err(|source| LanguageError::InvalidRegex {
                        pattern: rule.pattern.clone(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let fold = |word: &String| {
            if self.case_sensitive {
                word.clone()
            } else {
                word.to_uppercase()
            }
        };
        let keywords = self.keywords.iter().map(fold).collect();
        let identifiers = self.identifiers.keys().map(fold).collect();
        let preproc_identifiers = self.preproc_identifiers.keys().map(fold).collect();

        tracing::debug!(
            language = %self.name,
            rules = rules.len(),
            native_tokenizer = self.tokenizer.is_some(),
            "compiled language definition"
        );

        Ok(CompiledLanguage {
            definition: self,
            rules,
            keywords,
            identifiers,
            preproc_identifiers,
        })
    }
}

/// A definition with its regex rules compiled and word lists case-folded
#[derive(Debug, Clone)]
pub struct CompiledLanguage {
    definition: Arc<LanguageDefinition>,
    rules: Vec<(Regex, PaletteIndex)>,
    keywords: BTreeSet<String>,
    identifiers: BTreeSet<String>,
    preproc_identifiers: BTreeSet<String>,
}

impl Default for CompiledLanguage {
    fn default() -> Self {
        Self {
            definition: Arc::new(LanguageDefinition::plain_text()),
            rules: Vec::new(),
            keywords: BTreeSet::new(),
            identifiers: BTreeSet::new(),
            preproc_identifiers: BTreeSet::new(),
        }
    }
}

impl CompiledLanguage {
    pub fn definition(&self) -> &Arc<LanguageDefinition> {
        &self.definition
    }

    pub fn rules(&self) -> &[(Regex, PaletteIndex)] {
        &self.rules
    }

    pub fn tokenizer(&self) -> Option<&dyn Tokenizer> {
        self.definition.tokenizer.as_deref()
    }

    /// Resolve a word matched as `Identifier` against the word lists.
    /// Inside a preprocessor line only preprocessor identifiers apply.
    /// A word found in no list stays `Identifier`; it is never demoted to
    /// `Default`.
    pub fn resolve_identifier(&self, word: &[u8], in_preprocessor: bool) -> PaletteIndex {
        let word = String::from_utf8_lossy(word);
        let word = if self.definition.case_sensitive {
            word
        } else {
            Cow::Owned(word.to_uppercase())
        };
        let word = word.as_ref();

        if in_preprocessor {
            if self.preproc_identifiers.contains(word) {
                PaletteIndex::PreprocIdentifier
            } else {
                PaletteIndex::Identifier
            }
        } else if self.keywords.contains(word) {
            PaletteIndex::Keyword
        } else if self.identifiers.contains(word) {
            PaletteIndex::KnownIdentifier
        } else if self.preproc_identifiers.contains(word) {
            PaletteIndex::PreprocIdentifier
        } else {
            PaletteIndex::Identifier
        }
    }
}

fn words<'a>(list: impl IntoIterator<Item = &'a &'a str>) -> BTreeSet<String> {
    list.into_iter().map(|w| w.to_string()).collect()
}

fn declarations<'a>(
    list: impl IntoIterator<Item = &'a &'a str>,
    declaration: &str,
) -> BTreeMap<String, String> {
    list.into_iter()
        .map(|w| (w.to_string(), declaration.to_string()))
        .collect()
}

/// Regex rules shared by C-family languages without a native tokenizer
fn c_like_rules() -> Vec<TokenRule> {
    vec![
        TokenRule::new(r"[ \t]*#[ \t]*[a-zA-Z_]+", PaletteIndex::Preprocessor),
        TokenRule::new(r#"L?"(\\.|[^"])*""#, PaletteIndex::String),
        TokenRule::new(r"'\\?[^']'", PaletteIndex::CharLiteral),
        TokenRule::new(r"0[xX][0-9a-fA-F]+[uU]?[lL]?[lL]?", PaletteIndex::Number),
        TokenRule::new(r"0[0-7]+[uU]?[lL]?[lL]?", PaletteIndex::Number),
        TokenRule::new(
            r"[+-]?([0-9]+([.][0-9]*)?|[.][0-9]+)([eE][+-]?[0-9]+)?[fF]?",
            PaletteIndex::Number,
        ),
        TokenRule::new(r"[+-]?[0-9]+[uU]?[lL]?[lL]?", PaletteIndex::Number),
        TokenRule::new(r"[a-zA-Z_][a-zA-Z0-9_]*", PaletteIndex::Identifier),
        TokenRule::new(
            r"[\[\]\{\}!%\^&\*\(\)\-\+=~\|<>\?/;,\.]",
            PaletteIndex::Punctuation,
        ),
    ]
}

const C_KEYWORDS: &[&str] = &[
    "auto", "break", "case", "char", "const", "continue", "default", "do", "double", "else",
    "enum", "extern", "float", "for", "goto", "if", "inline", "int", "long", "register",
    "restrict", "return", "short", "signed", "sizeof", "static", "struct", "switch", "typedef",
    "union", "unsigned", "void", "volatile", "while", "_Alignas", "_Alignof", "_Atomic", "_Bool",
    "_Complex", "_Generic", "_Noreturn", "_Static_assert", "_Thread_local",
];

const CPP_KEYWORDS: &[&str] = &[
    "alignas", "alignof", "and", "and_eq", "asm", "bitand", "bitor", "bool", "catch", "char16_t",
    "char32_t", "class", "compl", "concept", "const_cast", "constexpr", "decltype", "delete",
    "dynamic_cast", "explicit", "export", "false", "friend", "mutable", "namespace", "new",
    "noexcept", "not", "not_eq", "nullptr", "operator", "or", "or_eq", "private", "protected",
    "public", "reinterpret_cast", "static_assert", "static_cast", "template", "this",
    "thread_local", "throw", "true", "try", "typeid", "typename", "using", "virtual", "wchar_t",
    "xor", "xor_eq",
];

const GLSL_KEYWORDS: &[&str] = &[
    "attribute", "uniform", "varying", "layout", "centroid", "flat", "smooth", "noperspective",
    "patch", "sample", "subroutine", "in", "out", "inout", "bool", "true", "false", "invariant",
    "precise", "discard", "precision", "highp", "mediump", "lowp", "buffer", "shared",
    "coherent", "readonly", "writeonly", "vec2", "vec3", "vec4", "ivec2", "ivec3", "ivec4",
    "uvec2", "uvec3", "uvec4", "bvec2", "bvec3", "bvec4", "dvec2", "dvec3", "dvec4", "uint",
    "mat2", "mat3", "mat4", "mat2x2", "mat2x3", "mat2x4", "mat3x2", "mat3x3", "mat3x4",
    "mat4x2", "mat4x3", "mat4x4", "sampler1D", "sampler2D", "sampler3D", "samplerCube",
    "sampler2DShadow", "sampler2DArray", "isampler2D", "usampler2D", "image2D",
];

const GLSL_BUILTINS: &[&str] = &[
    "radians", "degrees", "sin", "cos", "tan", "asin", "acos", "atan", "sinh", "cosh", "tanh",
    "pow", "exp", "log", "exp2", "log2", "sqrt", "inversesqrt", "abs", "sign", "floor", "trunc",
    "round", "ceil", "fract", "mod", "min", "max", "clamp", "mix", "step", "smoothstep",
    "isnan", "isinf", "length", "distance", "dot", "cross", "normalize", "reflect", "refract",
    "faceforward", "matrixCompMult", "transpose", "determinant", "inverse", "lessThan",
    "greaterThan", "equal", "notEqual", "any", "all", "not", "texture", "textureLod",
    "textureSize", "texelFetch", "dFdx", "dFdy", "fwidth",
];

const C_LIBRARY: &[&str] = &[
    "abort", "abs", "atexit", "atof", "atoi", "atol", "calloc", "exit", "fclose", "fgets",
    "fopen", "fprintf", "fread", "free", "fwrite", "getchar", "malloc", "memcpy", "memmove",
    "memset", "printf", "putchar", "puts", "qsort", "rand", "realloc", "scanf", "snprintf",
    "sprintf", "strcat", "strchr", "strcmp", "strcpy", "strlen", "strncmp", "strncpy", "time",
];

const CPP_LIBRARY: &[&str] = &[
    "std", "string", "vector", "map", "set", "unordered_map", "unique_ptr", "shared_ptr",
    "make_unique", "make_shared", "cout", "cin", "cerr", "endl", "move", "size_t",
];

const LUA_KEYWORDS: &[&str] = &[
    "and", "break", "do", "else", "elseif", "end", "false", "for", "function", "goto", "if",
    "in", "local", "nil", "not", "or", "repeat", "return", "then", "true", "until", "while",
];

const LUA_LIBRARY: &[&str] = &[
    "assert", "collectgarbage", "dofile", "error", "getmetatable", "ipairs", "load",
    "loadfile", "next", "pairs", "pcall", "print", "rawequal", "rawget", "rawlen", "rawset",
    "require", "select", "setmetatable", "tonumber", "tostring", "type", "xpcall", "coroutine",
    "string", "table", "math", "io", "os", "debug", "utf8",
];
