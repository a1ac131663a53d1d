use super::*;

/// Builds the reply forest for a flat list of comments. Every comment
/// appears exactly once; missing, self and cyclic parents yield roots.
pub(crate) fn build_comment_tree(flat: &[Comment]) -> Vec<CommentNode> {
  let mut nodes = flat
    .iter()
    .cloned()
    .map(|comment| Some(CommentNode::new(comment)))
    .collect::<Vec<_>>();

  let mut index_by_id = HashMap::with_capacity(flat.len());

  for (index, comment) in flat.iter().enumerate() {
    index_by_id.insert(comment.id.as_str(), index);
  }

  let mut parents = Vec::with_capacity(flat.len());
  let mut children = vec![Vec::new(); flat.len()];
  let mut roots = Vec::new();

  for (index, comment) in flat.iter().enumerate() {
    let parent = comment
      .parent_comment_id
      .as_deref()
      .filter(|parent_id| *parent_id != comment.id)
      .and_then(|parent_id| index_by_id.get(parent_id).copied());

    match parent {
      Some(parent) => children[parent].push(index),
      None => roots.push(index),
    }

    parents.push(parent);
  }

  break_cycles(&mut parents, &mut children, &mut roots);

  let by_creation = |&index: &usize| (flat[index].created_at, index);

  roots.sort_unstable_by_key(by_creation);

  for replies in &mut children {
    replies.sort_unstable_by_key(by_creation);
  }

  let mut order = Vec::with_capacity(flat.len());
  let mut stack = roots.clone();

  while let Some(index) = stack.pop() {
    order.push(index);
    stack.extend(children[index].iter().copied());
  }

  // Reverse pre-order visits every child before its parent.
  for &index in order.iter().rev() {
    let replies = children[index]
      .iter()
      .filter_map(|&child| nodes[child].take())
      .collect::<Vec<_>>();

    if let Some(node) = nodes[index].as_mut() {
      node.replies = replies;
    }
  }

  roots
    .iter()
    .filter_map(|&index| nodes[index].take())
    .collect()
}

/// Promotes one member of every parent cycle to a root so that all nodes
/// become reachable.
fn break_cycles(
  parents: &mut [Option<usize>],
  children: &mut [Vec<usize>],
  roots: &mut Vec<usize>,
) {
  let mut reachable = vec![false; parents.len()];

  for &root in roots.iter() {
    mark_reachable(root, children, &mut reachable);
  }

  let mut path_position = vec![None; parents.len()];

  for start in 0..parents.len() {
    if reachable[start] {
      continue;
    }

    // An unreachable node always has a parent and its ancestors are
    // unreachable too, so following parents must run into a cycle.
    let mut path = Vec::new();
    let mut current = start;

    while path_position[current].is_none() {
      path_position[current] = Some(path.len());
      path.push(current);

      match parents[current] {
        Some(parent) => current = parent,
        None => break,
      }
    }

    let cycle_start = path_position[current].unwrap_or(0);

    let promoted = path[cycle_start..]
      .iter()
      .copied()
      .min()
      .unwrap_or(start);

    for &index in &path {
      path_position[index] = None;
    }

    if let Some(parent) = parents[promoted].take() {
      children[parent].retain(|&child| child != promoted);
    }

    roots.push(promoted);

    mark_reachable(promoted, children, &mut reachable);
  }
}

fn mark_reachable(
  start: usize,
  children: &[Vec<usize>],
  reachable: &mut [bool],
) {
  let mut stack = vec![start];

  while let Some(index) = stack.pop() {
    if reachable[index] {
      continue;
    }

    reachable[index] = true;
    stack.extend(children[index].iter().copied());
  }
}

#[cfg(test)]
mod tests {
  use {super::*, chrono::TimeZone, std::collections::HashSet};

  fn comment(id: &str, parent: Option<&str>, minute: u32) -> Comment {
    Comment {
      author_agent_id: format!("agent-{id}"),
      author_name: format!("Agent {id}"),
      content: format!("comment {id}"),
      created_at: Utc.with_ymd_and_hms(2025, 1, 1, 10, minute, 0).unwrap(),
      id: id.to_string(),
      parent_comment_id: parent.map(str::to_string),
      post_id: "p1".to_string(),
      score: 0,
    }
  }

  fn ids(nodes: &[CommentNode]) -> Vec<&str> {
    nodes.iter().map(|node| node.comment.id.as_str()).collect()
  }

  fn collect_ids(forest: &[CommentNode]) -> Vec<String> {
    let mut ids = Vec::new();
    let mut stack = forest.iter().collect::<Vec<_>>();

    while let Some(node) = stack.pop() {
      ids.push(node.comment.id.clone());
      stack.extend(node.replies.iter());
    }

    ids
  }

  fn assert_ordered(forest: &[CommentNode], flat: &[Comment]) {
    let position = |id: &str| flat.iter().position(|c| c.id == id).unwrap();

    let mut levels = vec![forest];

    while let Some(level) = levels.pop() {
      for pair in level.windows(2) {
        let (a, b) = (&pair[0].comment, &pair[1].comment);

        assert!(
          a.created_at < b.created_at
            || (a.created_at == b.created_at
              && position(&a.id) < position(&b.id)),
          "{} should not precede {}",
          a.id,
          b.id
        );
      }

      for node in level {
        levels.push(node.replies.as_slice());
      }
    }
  }

  fn sample() -> Vec<Comment> {
    vec![
      comment("c", Some("a"), 7),
      comment("a", None, 5),
      comment("b", None, 1),
      comment("d", Some("a"), 6),
      comment("e", Some("d"), 9),
      comment("f", Some("missing"), 0),
      comment("g", Some("a"), 6),
      comment("h", None, 5),
    ]
  }

  #[test]
  fn empty_input_yields_empty_forest() {
    assert!(build_comment_tree(&[]).is_empty());
  }

  #[test]
  fn chain_nests_three_levels() {
    let flat = vec![
      comment("1", None, 0),
      comment("2", Some("1"), 1),
      comment("3", Some("2"), 2),
    ];

    let tree = build_comment_tree(&flat);

    assert_eq!(ids(&tree), vec!["1"]);
    assert_eq!(ids(&tree[0].replies), vec!["2"]);
    assert_eq!(ids(&tree[0].replies[0].replies), vec!["3"]);
    assert!(tree[0].replies[0].replies[0].replies.is_empty());
  }

  #[test]
  fn roots_are_ordered_by_creation() {
    let flat = vec![comment("late", None, 5), comment("early", None, 0)];

    assert_eq!(ids(&build_comment_tree(&flat)), vec!["early", "late"]);
  }

  #[test]
  fn dangling_parent_becomes_root() {
    let flat = vec![comment("1", None, 0), comment("5", Some("99"), 1)];

    assert_eq!(ids(&build_comment_tree(&flat)), vec!["1", "5"]);
  }

  #[test]
  fn self_reference_becomes_root() {
    let flat = vec![comment("1", None, 2), comment("2", Some("2"), 1)];

    let tree = build_comment_tree(&flat);

    assert_eq!(ids(&tree), vec!["2", "1"]);
    assert!(tree.iter().all(|node| node.replies.is_empty()));
  }

  #[test]
  fn parent_cycle_promotes_first_member_in_input_order() {
    let flat = vec![
      comment("root", None, 0),
      comment("x", Some("y"), 3),
      comment("y", Some("x"), 1),
      comment("z", Some("y"), 2),
    ];

    let tree = build_comment_tree(&flat);

    assert_eq!(ids(&tree), vec!["root", "x"]);
    assert_eq!(ids(&tree[1].replies), vec!["y"]);
    assert_eq!(ids(&tree[1].replies[0].replies), vec!["z"]);
  }

  #[test]
  fn equal_timestamps_keep_input_order() {
    let flat = vec![
      comment("p", None, 0),
      comment("r2", Some("p"), 4),
      comment("r1", Some("p"), 4),
      comment("r3", Some("p"), 4),
      comment("q", None, 0),
    ];

    let tree = build_comment_tree(&flat);

    assert_eq!(ids(&tree), vec!["p", "q"]);
    assert_eq!(ids(&tree[0].replies), vec!["r2", "r1", "r3"]);
  }

  #[test]
  fn every_comment_appears_exactly_once() {
    let flat = sample();
    let tree = build_comment_tree(&flat);

    let ids = collect_ids(&tree);

    assert_eq!(ids.len(), flat.len());
    assert_eq!(tree.iter().map(CommentNode::size).sum::<usize>(), flat.len());
    assert_eq!(ids.iter().collect::<HashSet<_>>().len(), flat.len());
  }

  #[test]
  fn siblings_are_ordered_at_every_level() {
    let flat = sample();
    let tree = build_comment_tree(&flat);

    assert_ordered(&tree, &flat);

    assert_eq!(ids(&tree), vec!["f", "b", "a", "h"]);
    assert_eq!(ids(&tree[2].replies), vec!["d", "g", "c"]);
    assert_eq!(ids(&tree[2].replies[0].replies), vec!["e"]);
  }

  #[test]
  fn building_twice_is_identical_and_leaves_input_untouched() {
    let flat = sample();
    let snapshot = flat.clone();

    let first = build_comment_tree(&flat);
    let second = build_comment_tree(&flat);

    assert_eq!(first, second);
    assert_eq!(flat, snapshot);
  }

  #[test]
  fn duplicate_ids_keep_every_record() {
    let flat = vec![
      comment("1", None, 0),
      comment("1", None, 1),
      comment("2", Some("1"), 2),
    ];

    let tree = build_comment_tree(&flat);

    assert_eq!(tree.iter().map(CommentNode::size).sum::<usize>(), 3);
    assert!(tree[0].replies.is_empty());
    assert_eq!(ids(&tree[1].replies), vec!["2"]);
  }

  #[test]
  fn deep_chains_do_not_overflow() {
    let depth = 50_000;

    let flat = (0..depth)
      .map(|i| {
        let mut c = comment(&i.to_string(), None, 0);

        if i > 0 {
          c.parent_comment_id = Some((i - 1).to_string());
        }

        c
      })
      .collect::<Vec<_>>();

    let tree = build_comment_tree(&flat);

    assert_eq!(tree.len(), 1);
    assert_eq!(tree[0].size(), depth);
  }
}
