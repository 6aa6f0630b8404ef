//! Syntax highlighting for JavaScript, TypeScript, JSX and TSX.
//!
//! Code is parsed with the syntect grammars bundled at build time. Scope
//! stacks are folded into the small [`TokenKind`] set the theme palettes
//! know how to color; everything else is [`TokenKind::Plain`].

use once_cell::sync::Lazy;
use serde::Serialize;
use syntect::dumps::from_uncompressed_data;
use syntect::easy::ScopeRegionIterator;
use syntect::parsing::{ParseState, ScopeStack, SyntaxReference, SyntaxSet};
use tracing::{debug, error};

use snipreel_core::Language;
use snipreel_theme::SyntaxRole;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenKind {
    Keyword,
    String,
    Number,
    Comment,
    Function,
    Variable,
    Operator,
    Punctuation,
    ClassName,
    Parameter,
    Property,
    Tag,
    AttrName,
    Constant,
    Regex,
    Builtin,
    Boolean,
    /// Whitespace, identifiers and JSX text; drawn in the theme foreground.
    Plain,
}

impl TokenKind {
    /// Palette role used to color this token, if any.
    pub fn role(&self) -> Option<SyntaxRole> {
        match self {
            TokenKind::Keyword => Some(SyntaxRole::Keyword),
            TokenKind::String => Some(SyntaxRole::String),
            TokenKind::Number => Some(SyntaxRole::Number),
            TokenKind::Comment => Some(SyntaxRole::Comment),
            TokenKind::Function | TokenKind::Builtin => Some(SyntaxRole::Function),
            TokenKind::Variable => Some(SyntaxRole::Variable),
            TokenKind::Operator => Some(SyntaxRole::Operator),
            TokenKind::Punctuation => Some(SyntaxRole::Punctuation),
            TokenKind::ClassName => Some(SyntaxRole::ClassName),
            TokenKind::Parameter => Some(SyntaxRole::Parameter),
            TokenKind::Property => Some(SyntaxRole::Property),
            TokenKind::Tag => Some(SyntaxRole::Tag),
            TokenKind::AttrName => Some(SyntaxRole::Attribute),
            TokenKind::Constant | TokenKind::Boolean => Some(SyntaxRole::Constant),
            TokenKind::Regex => Some(SyntaxRole::Regex),
            TokenKind::Plain => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

// ─── Grammars ───────────────────────────────────────────────────────

static SYNTAXES: Lazy<Option<SyntaxSet>> = Lazy::new(|| {
    let bytes = include_bytes!(env!("SYNTAX_PACK_FILE"));
    match from_uncompressed_data::<SyntaxSet>(bytes) {
        Ok(set) => Some(set),
        Err(e) => {
            error!(error = %e, "Bundled syntax pack is unreadable, highlighting disabled");
            None
        }
    }
});

/// Grammar extensions to try for a language, in order. `jsx` uses the TSX
/// grammar.
fn extensions(language: Language) -> &'static [&'static str] {
    match language {
        Language::Javascript => &["js"],
        Language::Typescript => &["ts", "js"],
        Language::Jsx | Language::Tsx => &["tsx", "jsx", "js"],
    }
}

fn find_syntax(set: &SyntaxSet, language: Language) -> &SyntaxReference {
    extensions(language)
        .iter()
        .find_map(|ext| set.find_syntax_by_extension(ext))
        .or_else(|| set.find_syntax_by_token(&language.to_string()))
        .unwrap_or_else(|| set.find_syntax_plain_text())
}

// ─── Scope mapping ──────────────────────────────────────────────────

/// Scope prefixes and the kind they select. Earlier entries win when several
/// prefixes match the same scope.
const SCOPE_KINDS: &[(&str, TokenKind)] = &[
    ("comment", TokenKind::Comment),
    ("punctuation.definition.comment", TokenKind::Comment),
    ("string.regexp", TokenKind::Regex),
    ("punctuation.definition.string", TokenKind::String),
    ("string", TokenKind::String),
    ("constant.numeric", TokenKind::Number),
    ("constant.language.boolean", TokenKind::Boolean),
    ("constant.language", TokenKind::Constant),
    ("constant.other", TokenKind::Constant),
    ("variable.other.constant", TokenKind::Constant),
    ("support.constant", TokenKind::Constant),
    ("variable.parameter", TokenKind::Parameter),
    ("variable.other.property", TokenKind::Property),
    ("variable.other.object.property", TokenKind::Property),
    ("meta.object-literal.key", TokenKind::Property),
    ("support.variable.property", TokenKind::Property),
    ("entity.name.function", TokenKind::Function),
    ("variable.function", TokenKind::Function),
    ("support.function", TokenKind::Builtin),
    ("support.type", TokenKind::Builtin),
    ("support.class.component", TokenKind::ClassName),
    ("support.class", TokenKind::Builtin),
    ("entity.name.tag", TokenKind::Tag),
    ("entity.other.attribute-name", TokenKind::AttrName),
    ("entity.name.class", TokenKind::ClassName),
    ("entity.name.type", TokenKind::ClassName),
    ("entity.other.inherited-class", TokenKind::ClassName),
    ("keyword.operator", TokenKind::Operator),
    ("keyword", TokenKind::Keyword),
    ("storage", TokenKind::Keyword),
    ("variable.language", TokenKind::Keyword),
    ("meta.binding.name", TokenKind::Variable),
    ("meta.definition.variable", TokenKind::Variable),
    ("punctuation", TokenKind::Punctuation),
    ("meta.brace", TokenKind::Punctuation),
];

/// Whether dotted scope `scope` is `prefix` or nested under it.
fn scope_matches(scope: &str, prefix: &str) -> bool {
    scope.starts_with(prefix)
        && matches!(scope.as_bytes().get(prefix.len()), None | Some(b'.'))
}

fn kind_for_scope(scope: &str) -> Option<TokenKind> {
    SCOPE_KINDS
        .iter()
        .find(|(prefix, _)| scope_matches(scope, prefix))
        .map(|(_, kind)| *kind)
}

/// Fold a scope stack into one token kind. Comments and regex literals
/// claim their whole extent, delimiters included; otherwise the innermost
/// mapped scope decides.
fn classify(stack: &ScopeStack) -> TokenKind {
    let scopes: Vec<String> = stack
        .as_slice()
        .iter()
        .map(|scope| scope.build_string())
        .collect();

    for (prefix, kind) in [("comment", TokenKind::Comment), ("string.regexp", TokenKind::Regex)] {
        if scopes.iter().any(|s| scope_matches(s, prefix)) {
            return kind;
        }
    }

    scopes
        .iter()
        .rev()
        .find_map(|s| kind_for_scope(s))
        .unwrap_or(TokenKind::Plain)
}

// ─── Tokenizing ─────────────────────────────────────────────────────

/// Append `text` to `line`, merging it into the previous token when the
/// kinds agree.
fn push_token(line: &mut Vec<Token>, kind: TokenKind, text: &str) {
    if text.is_empty() {
        return;
    }
    match line.last_mut() {
        Some(last) if last.kind == kind => last.text.push_str(text),
        _ => line.push(Token::new(kind, text)),
    }
}

fn plain_line(text: &str) -> Vec<Token> {
    let mut line = Vec::new();
    push_token(&mut line, TokenKind::Plain, text);
    line
}

struct LineParser<'a> {
    set: &'a SyntaxSet,
    state: ParseState,
    stack: ScopeStack,
    /// Set once the grammar fails; the remaining lines are left plain.
    broken: bool,
}

impl<'a> LineParser<'a> {
    fn new(set: &'a SyntaxSet, syntax: &SyntaxReference) -> Self {
        Self {
            set,
            state: ParseState::new(syntax),
            stack: ScopeStack::new(),
            broken: false,
        }
    }

    /// Tokenize one line, given without its trailing newline.
    fn line(&mut self, text: &str) -> Vec<Token> {
        if self.broken {
            return plain_line(text);
        }
        // The grammars are compiled for newline-terminated input.
        let input = format!("{text}\n");
        let ops = match self.state.parse_line(&input, self.set) {
            Ok(ops) => ops,
            Err(e) => {
                debug!(error = %e, "Grammar failed, leaving the rest of the code plain");
                self.broken = true;
                return plain_line(text);
            }
        };

        let mut tokens = Vec::new();
        let mut consumed = 0;
        for (region, op) in ScopeRegionIterator::new(&ops, &input) {
            if self.stack.apply(op).is_err() {
                self.broken = true;
                push_token(&mut tokens, TokenKind::Plain, &text[consumed.min(text.len())..]);
                return tokens;
            }
            let end = (consumed + region.len()).min(text.len());
            if consumed < end {
                push_token(&mut tokens, classify(&self.stack), &text[consumed..end]);
            }
            consumed += region.len();
        }
        if consumed < text.len() {
            push_token(&mut tokens, TokenKind::Plain, &text[consumed..]);
        }
        tokens
    }
}

/// Tokenize `code` and split the tokens at line breaks. The result always has
/// one entry per line of `code`, and no token contains a newline.
pub fn highlight_lines(code: &str, language: Language) -> Vec<Vec<Token>> {
    let Some(set) = SYNTAXES.as_ref() else {
        return code.split('\n').map(plain_line).collect();
    };
    let mut parser = LineParser::new(set, find_syntax(set, language));
    code.split('\n').map(|line| parser.line(line)).collect()
}

/// Tokenize `code`. The token texts concatenate back to `code`.
pub fn highlight(code: &str, language: Language) -> Vec<Token> {
    let mut tokens = Vec::new();
    for (i, line) in highlight_lines(code, language).into_iter().enumerate() {
        if i > 0 {
            tokens.push(Token::new(TokenKind::Plain, "\n"));
        }
        tokens.extend(line);
    }
    tokens
}
