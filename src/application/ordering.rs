//! Sibling ordering shared by the renderers.

use crate::domain::{NodeComparator, NodeFilter, NodeRef, Tree, TreeResult};

/// Children of `nid` that pass `filter`, sorted for display.
///
/// With `sorting` on, siblings are ordered by `key`, or by tag when no key
/// is given; `reverse` flips that order. With `sorting` off, insertion order
/// is kept.
pub(crate) fn ordered_children<T>(
    tree: &Tree<T>,
    nid: &str,
    filter: Option<&NodeFilter<'_, T>>,
    key: Option<&NodeComparator<'_, T>>,
    sorting: bool,
    reverse: bool,
) -> TreeResult<Vec<NodeRef<T>>> {
    let mut children = tree.children(nid)?;
    if let Some(filter) = filter {
        children.retain(|child| filter(&child.borrow()));
    }
    if sorting {
        let cmp = |a: &NodeRef<T>, b: &NodeRef<T>| {
            let (a, b) = (a.borrow(), b.borrow());
            match key {
                Some(key) => key(&a, &b),
                None => a.cmp_by_tag(&b),
            }
        };
        if reverse {
            children.sort_by(|a, b| cmp(a, b).reverse());
        } else {
            children.sort_by(cmp);
        }
    }
    Ok(children)
}
