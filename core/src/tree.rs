use std::{collections::HashSet, mem};

use indexmap::IndexMap;
use serde::{ser::SerializeMap, Serialize, Serializer};

use crate::{modes::ModeValue, reference::Reference, value::ValueType};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    pub id: String,
    #[serde(rename = "type")]
    pub type_: ValueType,
    #[serde(rename = "valuesByMode")]
    pub values_by_mode: IndexMap<String, ModeValue>,
}
impl Token {
    pub fn references(&self, id: &str) -> bool {
        self.values_by_mode.values().any(|value| value.references(id))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TokenOrGroup {
    Token(Token),
    Group(Group),
}

/// Outcome of [`Group::insert`].
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub enum Insertion {
    Inserted,
    /// The path was already taken; the displaced node is returned.
    Replaced(TokenOrGroup),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Group(IndexMap<String, TokenOrGroup>);
impl Group {
    /// Places `token` under `key` inside the groups named by `parents`,
    /// creating missing groups on the way.
    ///
    /// Whatever previously occupied the path (a token at the final key, a
    /// group at the final key, or a token where a group is needed) is
    /// overwritten and handed back in [`Insertion::Replaced`].
    pub fn insert(&mut self, parents: &[String], key: String, token: Token) -> Insertion {
        let Some((head, rest)) = parents.split_first() else {
            return match self.0.insert(key, TokenOrGroup::Token(token)) {
                Some(previous) => Insertion::Replaced(previous),
                None => Insertion::Inserted,
            };
        };
        let child = self
            .0
            .entry(head.clone())
            .or_insert_with(|| TokenOrGroup::Group(Group::default()));
        match child {
            TokenOrGroup::Group(group) => group.insert(rest, key, token),
            TokenOrGroup::Token(_) => {
                let mut group = Group::default();
                let _ = group.insert(rest, key, token);
                Insertion::Replaced(mem::replace(child, TokenOrGroup::Group(group)))
            }
        }
    }
    pub fn get(&self, key: &str) -> Option<&TokenOrGroup> {
        self.0.get(key)
    }
    pub fn iter(&self) -> impl Iterator<Item = (&String, &TokenOrGroup)> {
        self.0.iter()
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    /// Token found by descending `path`.
    pub fn token_at(&self, path: &[String]) -> Option<&Token> {
        let (head, rest) = path.split_first()?;
        match (self.0.get(head)?, rest.is_empty()) {
            (TokenOrGroup::Token(token), true) => Some(token),
            (TokenOrGroup::Group(group), false) => group.token_at(rest),
            _ => None,
        }
    }
}

/// One collection's tokens plus the collection's display name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectionTree {
    pub name: String,
    pub tokens: Group,
}
impl Serialize for CollectionTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.tokens.serialize(serializer)
    }
}

/// Normalized collection name to that collection's token tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutputTree {
    collections: IndexMap<String, CollectionTree>,
}
impl Serialize for OutputTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.collections.len()))?;
        for (key, collection) in &self.collections {
            map.serialize_entry(key, collection)?;
        }
        map.end()
    }
}
impl OutputTree {
    /// Root group for `key`, created empty on first use.
    pub fn collection_mut(&mut self, key: &str, name: &str) -> &mut Group {
        &mut self
            .collections
            .entry(key.to_string())
            .or_insert_with(|| CollectionTree {
                name: name.to_string(),
                tokens: Group::default(),
            })
            .tokens
    }

    /// Looks a collection up by its key or its display name.
    pub fn get(&self, name: &str) -> Option<(&String, &CollectionTree)> {
        self.collections
            .get_key_value(name)
            .or_else(|| self.collections.iter().find(|(_, tree)| tree.name == name))
    }

    /// A tree holding only the named collection.
    pub fn select(&self, name: &str) -> Option<OutputTree> {
        let (key, tree) = self.get(name)?;
        let mut collections = IndexMap::with_capacity(1);
        collections.insert(key.clone(), tree.clone());
        Some(OutputTree { collections })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &CollectionTree)> {
        self.collections.iter()
    }
    pub fn len(&self) -> usize {
        self.collections.len()
    }
    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Dotted path (collection key first) of the first token, depth-first,
    /// that has a mode value referencing the variable `target_id`.
    pub fn find_path_by_reference(&self, target_id: &str) -> Option<String> {
        self.search(&|token: &Token| token.references(target_id))
    }

    /// Dotted path of the token built from the variable `id`.
    pub fn find_path_by_id(&self, id: &str) -> Option<String> {
        self.search(&|token: &Token| token.id == id)
    }

    fn search(&self, matches: &dyn Fn(&Token) -> bool) -> Option<String> {
        let mut path = Vec::new();
        self.collections.iter().find_map(|(key, tree)| {
            path.push(key.as_str());
            let found = search_group(&tree.tokens, &mut path, matches);
            path.pop();
            found
        })
    }

    /// Token a reference points at. Qualified references name their
    /// collection first; bare references are tried in every collection.
    pub fn token(&self, reference: &Reference) -> Option<&Token> {
        let segments = reference.segments();
        let qualified = segments
            .split_first()
            .and_then(|(head, rest)| self.collections.get(head)?.tokens.token_at(rest));
        qualified.or_else(|| {
            self.collections
                .values()
                .find_map(|tree| tree.tokens.token_at(segments))
        })
    }

    /// Follows `reference` through alias values until a literal value for
    /// `mode` is reached.
    ///
    /// Tokens that lack `mode` (e.g. in a collection with other modes)
    /// contribute their first mode's value. Cycles and dangling links give
    /// `None`.
    pub fn resolve(&self, reference: &Reference, mode: &str) -> Option<&ModeValue> {
        let mut visited = HashSet::new();
        let mut current = reference;
        loop {
            if !visited.insert(current) {
                return None;
            }
            let token = self.token(current)?;
            let value = token
                .values_by_mode
                .get(mode)
                .or_else(|| token.values_by_mode.values().next())?;
            match value {
                ModeValue::Alias { reference, .. } => current = reference,
                literal => return Some(literal),
            }
        }
    }
}

fn search_group<'a>(
    group: &'a Group,
    path: &mut Vec<&'a str>,
    matches: &dyn Fn(&Token) -> bool,
) -> Option<String> {
    for (key, node) in group.iter() {
        path.push(key);
        let found = match node {
            TokenOrGroup::Token(token) => matches(token).then(|| path.join(".")),
            TokenOrGroup::Group(inner) => search_group(inner, path, matches),
        };
        path.pop();
        if found.is_some() {
            return found;
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::*;

    fn token(id: &str, values: Vec<(&str, ModeValue)>) -> Token {
        Token {
            id: id.to_string(),
            type_: ValueType::Color,
            values_by_mode: values
                .into_iter()
                .map(|(mode, value)| (mode.to_string(), value))
                .collect(),
        }
    }

    fn hex(value: &str) -> ModeValue {
        ModeValue::Hex(value.to_string())
    }

    fn alias(target: &str, reference: &str) -> ModeValue {
        ModeValue::Alias {
            target: target.to_string(),
            reference: Reference::parse(reference).unwrap(),
        }
    }

    fn path(segments: &[&str]) -> Vec<String> {
        segments.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn creates_groups_on_demand() {
        let mut root = Group::default();
        let first = root.insert(&path(&["neutral", "warm"]), "50".into(), token("v:1", vec![]));
        let second = root.insert(&path(&["neutral", "warm"]), "900".into(), token("v:2", vec![]));
        let third = root.insert(&[], "white".into(), token("v:3", vec![]));
        assert_eq!(first, Insertion::Inserted);
        assert_eq!(second, Insertion::Inserted);
        assert_eq!(third, Insertion::Inserted);

        assert_eq!(root.len(), 2);
        assert_eq!(root.token_at(&path(&["neutral", "warm", "50"])).unwrap().id, "v:1");
        assert_eq!(root.token_at(&path(&["neutral", "warm", "900"])).unwrap().id, "v:2");
        assert_eq!(root.token_at(&path(&["white"])).unwrap().id, "v:3");
        assert_eq!(root.token_at(&path(&["neutral", "warm"])), None);
        assert_eq!(root.token_at(&path(&["white", "extra"])), None);
    }

    #[test]
    fn last_write_wins_and_reports_the_collision() {
        let mut root = Group::default();
        let _ = root.insert(&path(&["brand"]), "primary".into(), token("v:1", vec![]));

        match root.insert(&path(&["brand"]), "primary".into(), token("v:2", vec![])) {
            Insertion::Replaced(TokenOrGroup::Token(previous)) => assert_eq!(previous.id, "v:1"),
            other => panic!("unexpected insertion result: {other:?}"),
        }

        match root.insert(&path(&["brand", "primary"]), "hover".into(), token("v:3", vec![])) {
            Insertion::Replaced(TokenOrGroup::Token(previous)) => assert_eq!(previous.id, "v:2"),
            other => panic!("unexpected insertion result: {other:?}"),
        }
        assert_eq!(root.token_at(&path(&["brand", "primary", "hover"])).unwrap().id, "v:3");

        match root.insert(&path(&[]), "brand".into(), token("v:4", vec![])) {
            Insertion::Replaced(TokenOrGroup::Group(previous)) => assert_eq!(previous.len(), 1),
            other => panic!("unexpected insertion result: {other:?}"),
        }
        assert_eq!(root.token_at(&path(&["brand"])).unwrap().id, "v:4");
    }

    fn sample() -> OutputTree {
        let mut tree = OutputTree::default();
        let colors = tree.collection_mut("referenceColors", "Reference Colors");
        let _ = colors.insert(&path(&["neutral"]), "900".into(), token("v:1", vec![("base", hex("#000000"))]));
        let semantic = tree.collection_mut("semantic", "Semantic");
        let _ = semantic.insert(
            &path(&["text"]),
            "default".into(),
            token("v:2", vec![("light", alias("v:1", "{referenceColors.neutral.900}"))]),
        );
        let _ = semantic.insert(
            &path(&["text"]),
            "body".into(),
            token("v:3", vec![("light", alias("v:2", "{semantic.text.default}"))]),
        );
        tree
    }

    #[test]
    fn serializes_as_plain_nested_json() {
        let value: Value = serde_json::to_value(sample()).unwrap();
        assert_eq!(
            value["referenceColors"],
            json!({"neutral": {"900": {"id": "v:1", "type": "Color", "valuesByMode": {"base": "#000000"}}}})
        );
        assert_eq!(
            value["semantic"]["text"]["default"]["valuesByMode"]["light"],
            json!("{referenceColors.neutral.900}")
        );
        assert!(sample().to_json_pretty().unwrap().contains("\n  \"referenceColors\": {\n    \"neutral\""));
    }

    #[test]
    fn reverse_lookups() {
        let tree = sample();
        assert_eq!(tree.find_path_by_reference("v:1").as_deref(), Some("semantic.text.default"));
        assert_eq!(tree.find_path_by_reference("v:2").as_deref(), Some("semantic.text.body"));
        assert_eq!(tree.find_path_by_reference("v:3"), None);
        assert_eq!(tree.find_path_by_id("v:1").as_deref(), Some("referenceColors.neutral.900"));
        assert_eq!(tree.find_path_by_id("v:404"), None);
        assert_eq!(OutputTree::default().find_path_by_reference("v:1"), None);
    }

    #[test]
    fn resolves_alias_chains() {
        let tree = sample();
        let body = Reference::parse("{semantic.text.body}").unwrap();
        assert_eq!(tree.resolve(&body, "light"), Some(&hex("#000000")));

        let bare = Reference::parse("{neutral.900}").unwrap();
        assert_eq!(tree.resolve(&bare, "base"), Some(&hex("#000000")));

        let missing = Reference::parse("{semantic.text.missing}").unwrap();
        assert_eq!(tree.resolve(&missing, "light"), None);
    }

    #[test]
    fn alias_cycles_do_not_loop() {
        let mut tree = OutputTree::default();
        let group = tree.collection_mut("loop", "Loop");
        let _ = group.insert(&[], "a".into(), token("v:a", vec![("base", alias("v:b", "{loop.b}"))]));
        let _ = group.insert(&[], "b".into(), token("v:b", vec![("base", alias("v:a", "{loop.a}"))]));
        assert_eq!(tree.resolve(&Reference::parse("{loop.a}").unwrap(), "base"), None);
    }

    #[test]
    fn selects_collections_by_key_or_name() {
        let tree = sample();
        assert_eq!(tree.select("semantic").unwrap().len(), 1);
        let by_name = tree.select("Reference Colors").unwrap();
        assert_eq!(by_name.iter().next().unwrap().0, "referenceColors");
        assert!(tree.select("nope").is_none());
    }
}
