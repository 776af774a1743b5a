//! Discovery of function-likes and class-likes in a token stream
//!
//! Named functions, methods and closures that are not nested in another
//! function-like are collected; closures inside a body belong to that body.

use std::ops::Range;

use tokenfix_core::{BlockFinder, TokenKind, TokenStream};

/// Name given to closures and arrow functions
pub const CLOSURE_NAME: &str = "{closure}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionLikeKind {
    Function,
    Method,
    Closure,
    ArrowFunction,
}

/// A function-like with a body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionLike {
    pub kind: FunctionLikeKind,
    /// `App\run`, `App\Runner::run` or `{closure}`
    pub name: String,
    /// Index into [`Symbols::classes`] for methods
    pub class: Option<usize>,
    /// Index of the `function` or `fn` keyword
    pub keyword: usize,
    /// Tokens of the body, braces excluded
    pub body: Range<usize>,
}

/// A class, interface, trait or enum
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassLike {
    pub kind: TokenKind,
    /// Namespace-qualified name, `class@anonymous` for anonymous classes
    pub name: String,
    pub keyword: usize,
    /// Tokens of the body, braces excluded
    pub body: Range<usize>,
}

/// Everything a file declares that rules report on
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Symbols {
    pub functions: Vec<FunctionLike>,
    pub classes: Vec<ClassLike>,
}

impl Symbols {
    /// Walk the stream once and collect its function-likes and class-likes
    pub fn collect(stream: &TokenStream, blocks: &BlockFinder) -> Self {
        let mut symbols = Symbols::default();
        let mut namespace = String::new();
        let mut open_classes: Vec<usize> = Vec::new();
        let mut index = 0;

        while index < stream.len() {
            while let Some(&class) = open_classes.last() {
                if index >= symbols.classes[class].body.end {
                    open_classes.pop();
                } else {
                    break;
                }
            }

            match stream[index].kind {
                TokenKind::Namespace => {
                    if let Some(name) = stream
                        .next_meaningful(index)
                        .filter(|&n| stream[n].is_kind(TokenKind::Identifier))
                    {
                        namespace = stream[name].content.trim_start_matches('\\').to_string();
                        index = name;
                    }
                }
                TokenKind::Class | TokenKind::Interface | TokenKind::Trait | TokenKind::Enum => {
                    if let Some(class) = class_like_at(stream, blocks, index, &namespace) {
                        index = class.body.start;
                        open_classes.push(symbols.classes.len());
                        symbols.classes.push(class);
                        continue;
                    }
                }
                TokenKind::Function | TokenKind::Fn => {
                    let class = open_classes.last().copied();
                    if let Some(function) = function_like_at(stream, blocks, index) {
                        let next = function.body.end;
                        symbols.functions.push(name_function(function, class, &symbols.classes, &namespace));
                        index = next;
                        continue;
                    }
                }
                _ => {}
            }

            index += 1;
        }

        symbols
    }

    /// Methods declared directly in the class-like at `class`
    pub fn methods_of(&self, class: usize) -> impl Iterator<Item = &FunctionLike> {
        self.functions
            .iter()
            .filter(move |f| f.kind == FunctionLikeKind::Method && f.class == Some(class))
    }
}

/// A function-like found before it is named
struct Found {
    kind: FunctionLikeKind,
    name: Option<String>,
    keyword: usize,
    body: Range<usize>,
}

fn name_function(found: Found, class: Option<usize>, classes: &[ClassLike], namespace: &str) -> FunctionLike {
    let (kind, name, class) = match (found.name, class) {
        (Some(name), Some(class)) => (
            FunctionLikeKind::Method,
            format!("{}::{}", classes[class].name, name),
            Some(class),
        ),
        (Some(name), None) => (FunctionLikeKind::Function, qualify(namespace, &name), None),
        (None, _) => (found.kind, CLOSURE_NAME.to_string(), None),
    };

    FunctionLike {
        kind,
        name,
        class,
        keyword: found.keyword,
        body: found.body,
    }
}

fn qualify(namespace: &str, name: &str) -> String {
    if namespace.is_empty() {
        name.to_string()
    } else {
        format!("{}\\{}", namespace, name)
    }
}

fn class_like_at(stream: &TokenStream, blocks: &BlockFinder, keyword: usize, namespace: &str) -> Option<ClassLike> {
    let prev = stream.prev_meaningful(keyword).map(|p| stream[p].kind);
    if prev == Some(TokenKind::DoubleColon) {
        return None;
    }

    let next = stream.next_meaningful(keyword)?;
    let name = if stream[next].is_kind(TokenKind::Identifier) {
        qualify(namespace, &stream[next].content)
    } else if stream[keyword].is_kind(TokenKind::Class) && prev == Some(TokenKind::New) {
        "class@anonymous".to_string()
    } else {
        return None;
    };

    let mut index = next;
    loop {
        let token = stream.token_at(index)?;
        match token.kind {
            TokenKind::OpenBrace => {
                let block = blocks.starting_at(index)?;
                return Some(ClassLike {
                    kind: stream[keyword].kind,
                    name,
                    keyword,
                    body: block.inner(),
                });
            }
            TokenKind::Semicolon => return None,
            kind if kind.is_opener() => index = blocks.starting_at(index)?.end + 1,
            _ => index += 1,
        }
    }
}

fn function_like_at(stream: &TokenStream, blocks: &BlockFinder, keyword: usize) -> Option<Found> {
    let mut next = stream.next_meaningful(keyword)?;
    if stream[next].is_kind(TokenKind::Ampersand) {
        next = stream.next_meaningful(next)?;
    }

    let (name, params) = match stream[next].kind {
        TokenKind::Identifier => (Some(stream[next].content.clone()), stream.next_meaningful(next)?),
        TokenKind::OpenParen => (None, next),
        _ => return None,
    };
    if !stream[params].is_kind(TokenKind::OpenParen) {
        return None;
    }

    let kind = if stream[keyword].is_kind(TokenKind::Fn) {
        FunctionLikeKind::ArrowFunction
    } else {
        FunctionLikeKind::Closure
    };
    let body = function_body(stream, blocks, keyword, params)?;

    Some(Found {
        kind,
        name: if kind == FunctionLikeKind::ArrowFunction { None } else { name },
        keyword,
        body,
    })
}

/// Body of the closure or arrow function whose keyword is at `keyword`
pub(crate) fn closure_body(stream: &TokenStream, blocks: &BlockFinder, keyword: usize) -> Option<Range<usize>> {
    let mut params = stream.next_meaningful(keyword)?;
    if stream[params].is_kind(TokenKind::Ampersand) {
        params = stream.next_meaningful(params)?;
    }
    if !stream[params].is_kind(TokenKind::OpenParen) {
        return None;
    }
    function_body(stream, blocks, keyword, params)
}

/// Body following the parameter list at `params`
///
/// `None` for declarations without a body, such as abstract methods.
fn function_body(stream: &TokenStream, blocks: &BlockFinder, keyword: usize, params: usize) -> Option<Range<usize>> {
    let arrow = stream[keyword].is_kind(TokenKind::Fn);
    let mut index = blocks.starting_at(params)?.end + 1;

    loop {
        let token = stream.token_at(index)?;
        match token.kind {
            TokenKind::DoubleArrow if arrow => {
                return Some(index + 1..arrow_function_end(stream, blocks, index));
            }
            TokenKind::OpenBrace if !arrow => return Some(blocks.starting_at(index)?.inner()),
            TokenKind::Semicolon | TokenKind::Comma => return None,
            kind if kind.is_closer() => return None,
            kind if kind.is_opener() => index = blocks.starting_at(index)?.end + 1,
            _ => index += 1,
        }
    }
}

/// Index of the token ending the expression of an arrow function
fn arrow_function_end(stream: &TokenStream, blocks: &BlockFinder, arrow: usize) -> usize {
    let mut index = arrow + 1;
    while let Some(token) = stream.token_at(index) {
        match token.kind {
            TokenKind::Semicolon | TokenKind::Comma => return index,
            kind if kind.is_closer() => return index,
            kind if kind.is_opener() => match blocks.starting_at(index) {
                Some(block) => index = block.end + 1,
                None => return index,
            },
            _ => index += 1,
        }
    }
    stream.len()
}
