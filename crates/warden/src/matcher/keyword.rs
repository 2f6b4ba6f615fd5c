use warden_syntax::SyntaxNode;

use super::Matcher;
use crate::error::ErrorKind;
use crate::keyword::Keyword;
use crate::policy::Policy;

/// Rejects disabled keywords, whether used as syntax or spelled as a name.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordMatcher;

impl Matcher for KeywordMatcher {
    fn matches<'a>(&self, policy: &Policy, node: SyntaxNode<'a>) -> Option<SyntaxNode<'a>> {
        let kind = node.kind();
        if kind.is_identifier_like() {
            return Keyword::from_source(node.text())
                .filter(|keyword| !policy.is_keyword_enabled(*keyword))
                .map(|_| node);
        }
        Keyword::ALL
            .into_iter()
            .filter(|keyword| !policy.is_keyword_enabled(*keyword))
            .filter(|keyword| keyword.hosts().contains(&kind))
            .find_map(|keyword| node.child_of_kind(keyword.as_str()))
    }

    fn describe(&self, offending: SyntaxNode<'_>) -> ErrorKind {
        ErrorKind::KeywordNotAllowed {
            keyword: offending.text().to_owned(),
        }
    }
}
