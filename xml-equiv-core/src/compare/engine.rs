//! Iterative tree-equivalence traversal.
//!
//! The walk runs over an explicit work stack of node pairs instead of native
//! recursion, so arbitrarily deep documents cannot exhaust the call stack.
//! Within a container the checks run in a fixed order: document type, then
//! the order-significant residue (positionally), then the unordered pools
//! (elements, text, comments, processing instructions), each family's extras
//! checked against its own pool. Deferred descendant pairs are pushed in
//! reverse so they pop in discovery order, which pins which mismatch is
//! reported first when several exist.

use std::collections::{HashMap, VecDeque};
use std::hash::Hash;
use std::ptr;

use crate::compare::comparer::{Ordinal, StringComparer};
use crate::compare::options::{ComparisonOptions, FamilyRules, Rules};
use crate::compare::result::Mismatch;
use crate::tree::NodeKind;
use crate::XmlNode;

type Pair<'a> = (Option<&'a XmlNode>, Option<&'a XmlNode>);

/// Compare two trees under the strictest (default) options.
pub fn compare<'a>(left: Option<&'a XmlNode>, right: Option<&'a XmlNode>) -> Option<Mismatch<'a>> {
    compare_with(left, right, ComparisonOptions::default(), &Ordinal)
}

/// Compare two trees under `options` with byte-for-byte string equality.
pub fn compare_with_options<'a>(
    left: Option<&'a XmlNode>,
    right: Option<&'a XmlNode>,
    options: ComparisonOptions,
) -> Option<Mismatch<'a>> {
    compare_with(left, right, options, &Ordinal)
}

/// Compare two trees under `options`, using `comparer` for every textual
/// field on both sides.
///
/// Returns `None` when the trees are equivalent under the requested rules,
/// otherwise the first divergent pair in traversal order. A root absent on
/// one side is an ordinary mismatch; two absent roots are equivalent. The
/// inputs are never mutated and the call never fails.
pub fn compare_with<'a>(
    left: Option<&'a XmlNode>,
    right: Option<&'a XmlNode>,
    options: ComparisonOptions,
    comparer: &dyn StringComparer,
) -> Option<Mismatch<'a>> {
    let rules = Rules::normalize(options);
    let mut stack: Vec<Pair<'a>> = vec![(left, right)];

    while let Some(pair) = stack.pop() {
        let (l, r) = match pair {
            (None, None) => continue,
            (Some(l), Some(r)) => (l, r),
            (l, r) => return Some(Mismatch::between(l, r)),
        };
        if ptr::eq(l, r) {
            continue;
        }
        if l.kind() != r.kind() {
            return Some(Mismatch::of(l, r));
        }
        if let Some(found) = compare_node(l, r, &rules, comparer, &mut stack) {
            return Some(found);
        }
    }
    None
}

fn opt(s: Option<&str>) -> &str {
    s.unwrap_or_default()
}

/// Per-kind comparison of two nodes of the same kind. Containers push their
/// descendant pairs onto `stack` instead of recursing.
fn compare_node<'a>(
    left: &'a XmlNode,
    right: &'a XmlNode,
    rules: &Rules,
    cmp: &dyn StringComparer,
    stack: &mut Vec<Pair<'a>>,
) -> Option<Mismatch<'a>> {
    match left.kind() {
        NodeKind::Document => compare_children(left, right, rules, cmp, stack),
        NodeKind::Element => {
            if !cmp.eq(opt(left.name()), opt(right.name())) {
                return Some(Mismatch::of(left, right));
            }
            if let Some(found) = compare_attributes(left, right, rules, cmp) {
                return Some(found);
            }
            compare_children(left, right, rules, cmp, stack)
        }
        NodeKind::Attribute => {
            let equal = cmp.eq(opt(left.name()), opt(right.name()))
                && cmp.eq(opt(left.value()), opt(right.value()));
            (!equal).then(|| Mismatch::of(left, right))
        }
        NodeKind::Text | NodeKind::CData | NodeKind::Comment => {
            let equal = cmp.eq(opt(left.value()), opt(right.value()));
            (!equal).then(|| Mismatch::of(left, right))
        }
        NodeKind::ProcessingInstruction => {
            let equal = cmp.eq(opt(left.target()), opt(right.target()))
                && cmp.eq(opt(left.data()), opt(right.data()));
            (!equal).then(|| Mismatch::of(left, right))
        }
        NodeKind::DocumentType => compare_doctype(left, right, cmp),
    }
}

/// Absent public/system identifiers and internal subsets compare as empty
/// strings, never as faults.
fn compare_doctype<'a>(
    left: &'a XmlNode,
    right: &'a XmlNode,
    cmp: &dyn StringComparer,
) -> Option<Mismatch<'a>> {
    let equal = cmp.eq(opt(left.name()), opt(right.name()))
        && cmp.eq(opt(left.public_id()), opt(right.public_id()))
        && cmp.eq(opt(left.system_id()), opt(right.system_id()))
        && cmp.eq(opt(left.internal_subset()), opt(right.internal_subset()));
    (!equal).then(|| Mismatch::of(left, right))
}

/// Attribute equality is settled immediately at the owning element, either
/// positionally or by name-keyed multiset matching.
fn compare_attributes<'a>(
    left: &'a XmlNode,
    right: &'a XmlNode,
    rules: &Rules,
    cmp: &dyn StringComparer,
) -> Option<Mismatch<'a>> {
    let family = rules.attributes;
    if family.ignore_all {
        return None;
    }
    let lefts = left.attributes();
    let rights = right.attributes();

    if !family.ignore_order {
        let limit = lefts.len().max(rights.len());
        for index in 0..limit {
            match (lefts.get(index), rights.get(index)) {
                (Some(l), Some(r)) => {
                    let equal = cmp.eq(opt(l.name()), opt(r.name()))
                        && cmp.eq(opt(l.value()), opt(r.value()));
                    if !equal {
                        return Some(Mismatch::of(l, r));
                    }
                }
                (l, r) => return Some(Mismatch::between(l, r)),
            }
        }
        return None;
    }

    let mut buckets: HashMap<String, VecDeque<usize>> = HashMap::new();
    for (index, attr) in rights.iter().enumerate() {
        buckets
            .entry(cmp.key(opt(attr.name())).into_owned())
            .or_default()
            .push_back(index);
    }
    let mut matched = vec![false; rights.len()];
    for attr in lefts {
        let Some(bucket) = buckets.get_mut(cmp.key(opt(attr.name())).as_ref()) else {
            return Some(Mismatch::only_left(attr));
        };
        let position = bucket
            .iter()
            .position(|&index| cmp.eq(opt(attr.value()), opt(rights[index].value())));
        match position {
            Some(position) => {
                let index = bucket.remove(position).unwrap_or_default();
                matched[index] = true;
            }
            None => {
                // Same name present but no value matches: pair against the
                // first same-named leftover for a useful report.
                let index = bucket.front().copied();
                return Some(Mismatch::between(Some(attr), index.map(|i| &rights[i])));
            }
        }
    }
    if !family.ignore_extra {
        if let Some(index) = matched.iter().position(|used| !used) {
            return Some(Mismatch::only_right(&rights[index]));
        }
    }
    None
}

fn is_text_kind(kind: NodeKind) -> bool {
    matches!(kind, NodeKind::Text | NodeKind::CData)
}

fn has_non_text_child(children: &[XmlNode]) -> bool {
    children.iter().any(|child| !is_text_kind(child.kind()))
}

fn compare_children<'a>(
    left: &'a XmlNode,
    right: &'a XmlNode,
    rules: &Rules,
    cmp: &dyn StringComparer,
    stack: &mut Vec<Pair<'a>>,
) -> Option<Mismatch<'a>> {
    if rules.skip_all_children {
        return None;
    }
    let left_children = left.children();
    let right_children = right.children();
    if left_children.is_empty() && right_children.is_empty() {
        return None;
    }

    let mut deferred: Vec<(&'a XmlNode, &'a XmlNode)> = Vec::new();
    let found = if rules.strict_child_order {
        let lefts = ordered_children(left_children, rules);
        let rights = ordered_children(right_children, rules);
        lock_step(&lefts, &rights, &mut deferred)
    } else {
        partitioned_children(left_children, right_children, rules, cmp, &mut deferred)
    };
    if found.is_some() {
        return found;
    }

    for (l, r) in deferred.into_iter().rev() {
        stack.push((Some(l), Some(r)));
    }
    None
}

/// The full child list in document order, with formatting text dropped when
/// the mixed-content flag is set and this container holds non-text children.
fn ordered_children<'a>(children: &'a [XmlNode], rules: &Rules) -> Vec<&'a XmlNode> {
    let drop_text = rules.mixed_content_text && has_non_text_child(children);
    children
        .iter()
        .filter(|child| !(drop_text && is_text_kind(child.kind())))
        .collect()
}

/// Positional comparison: kinds and presence are settled here, content is
/// deferred to the stack.
fn lock_step<'a>(
    lefts: &[&'a XmlNode],
    rights: &[&'a XmlNode],
    deferred: &mut Vec<(&'a XmlNode, &'a XmlNode)>,
) -> Option<Mismatch<'a>> {
    let limit = lefts.len().max(rights.len());
    for index in 0..limit {
        match (lefts.get(index).copied(), rights.get(index).copied()) {
            (Some(l), Some(r)) => {
                if l.kind() != r.kind() {
                    return Some(Mismatch::of(l, r));
                }
                deferred.push((l, r));
            }
            (l, r) => return Some(Mismatch::between(l, r)),
        }
    }
    None
}

fn partitioned_children<'a>(
    left_children: &'a [XmlNode],
    right_children: &'a [XmlNode],
    rules: &Rules,
    cmp: &dyn StringComparer,
    deferred: &mut Vec<(&'a XmlNode, &'a XmlNode)>,
) -> Option<Mismatch<'a>> {
    let lefts = Partition::build(left_children, rules);
    let rights = Partition::build(right_children, rules);

    // The document type structurally precedes the root content, so it is
    // compared directly rather than ordered or pooled against siblings.
    match (lefts.doctype, rights.doctype) {
        (None, None) => {}
        (Some(l), Some(r)) => {
            if let Some(found) = compare_doctype(l, r, cmp) {
                return Some(found);
            }
        }
        (Some(l), None) => return Some(Mismatch::only_left(l)),
        (None, Some(r)) => {
            if !rules.document_types.ignore_extra {
                return Some(Mismatch::only_right(r));
            }
        }
    }

    if let Some(found) = lock_step(&lefts.residue, &rights.residue, deferred) {
        return Some(found);
    }

    if let Some(found) = match_pool(
        &lefts.elements,
        &rights.elements,
        rules.elements,
        |node| cmp.key(opt(node.name())).into_owned(),
        Some(deferred),
    ) {
        return Some(found);
    }
    if let Some(found) = match_pool(
        &lefts.text,
        &rights.text,
        rules.text,
        |node| (node.kind(), cmp.key(opt(node.value())).into_owned()),
        None,
    ) {
        return Some(found);
    }
    if let Some(found) = match_pool(
        &lefts.comments,
        &rights.comments,
        rules.comments,
        |node| cmp.key(opt(node.value())).into_owned(),
        None,
    ) {
        return Some(found);
    }
    match_pool(
        &lefts.pis,
        &rights.pis,
        rules.processing_instructions,
        |node| {
            (
                cmp.key(opt(node.target())).into_owned(),
                cmp.key(opt(node.data())).into_owned(),
            )
        },
        None,
    )
}

/// Multiset matching over one family's pools. Elements match by name and
/// defer their bodies; leaf kinds match by full value with no descent. The
/// extras check consults only this family's leftovers.
fn match_pool<'a, K, F>(
    lefts: &[&'a XmlNode],
    rights: &[&'a XmlNode],
    family: FamilyRules,
    key_of: F,
    mut deferred: Option<&mut Vec<(&'a XmlNode, &'a XmlNode)>>,
) -> Option<Mismatch<'a>>
where
    K: Hash + Eq,
    F: Fn(&'a XmlNode) -> K,
{
    if lefts.is_empty() && rights.is_empty() {
        return None;
    }
    let mut buckets: HashMap<K, VecDeque<usize>> = HashMap::new();
    for (index, &node) in rights.iter().enumerate() {
        buckets.entry(key_of(node)).or_default().push_back(index);
    }
    let mut matched = vec![false; rights.len()];
    for &node in lefts {
        match buckets.get_mut(&key_of(node)).and_then(VecDeque::pop_front) {
            Some(index) => {
                matched[index] = true;
                if let Some(deferred) = deferred.as_mut() {
                    deferred.push((node, rights[index]));
                }
            }
            None => return Some(Mismatch::only_left(node)),
        }
    }
    if !family.ignore_extra {
        if let Some(index) = matched.iter().position(|used| !used) {
            return Some(Mismatch::only_right(rights[index]));
        }
    }
    None
}

/// One side's children split for unordered comparison: the document type
/// child, the order-significant residue, and one pool per order-ignored kind.
struct Partition<'a> {
    doctype: Option<&'a XmlNode>,
    residue: Vec<&'a XmlNode>,
    elements: Vec<&'a XmlNode>,
    text: Vec<&'a XmlNode>,
    comments: Vec<&'a XmlNode>,
    pis: Vec<&'a XmlNode>,
}

impl<'a> Partition<'a> {
    fn build(children: &'a [XmlNode], rules: &Rules) -> Self {
        let mut partition = Partition {
            doctype: None,
            residue: Vec::new(),
            elements: Vec::new(),
            text: Vec::new(),
            comments: Vec::new(),
            pis: Vec::new(),
        };
        let drop_residue_text = rules.mixed_content_text && has_non_text_child(children);

        for child in children {
            match child.kind() {
                NodeKind::Element => {
                    route(rules.elements, child, &mut partition.elements, &mut partition.residue);
                }
                NodeKind::Text | NodeKind::CData => {
                    if rules.text.ignore_all {
                        continue;
                    }
                    if rules.text.ignore_order {
                        partition.text.push(child);
                    } else if !drop_residue_text {
                        partition.residue.push(child);
                    }
                }
                NodeKind::Comment => {
                    route(rules.comments, child, &mut partition.comments, &mut partition.residue);
                }
                NodeKind::ProcessingInstruction => {
                    route(
                        rules.processing_instructions,
                        child,
                        &mut partition.pis,
                        &mut partition.residue,
                    );
                }
                NodeKind::DocumentType => {
                    if rules.document_types.ignore_all {
                        continue;
                    }
                    if partition.doctype.is_none() {
                        partition.doctype = Some(child);
                    } else {
                        // Duplicate declarations are ill-formed; surface them
                        // as ordinary positional mismatches.
                        partition.residue.push(child);
                    }
                }
                // Ill-formed as children; compared positionally so they show
                // up as ordinary mismatches rather than faults.
                NodeKind::Document | NodeKind::Attribute => partition.residue.push(child),
            }
        }
        partition
    }
}

fn route<'a>(
    family: FamilyRules,
    child: &'a XmlNode,
    pool: &mut Vec<&'a XmlNode>,
    residue: &mut Vec<&'a XmlNode>,
) {
    if family.ignore_all {
        return;
    }
    if family.ignore_order {
        pool.push(child);
    } else {
        residue.push(child);
    }
}
