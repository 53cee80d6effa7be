// src/logic/path_finder.rs
//! 選んだカードからどこへ動かしていけるかを木構造で列挙するヒント探索だよ！🔍
//!
//! 盤面は読むだけで変更しない。実際に動かせるかどうかの最終判断は
//! `move_executor` と `Field` 側がやるので、ここの結果はあくまで表示用。
//!
//! ノードは `PathTree` のアリーナ (Vec) に入れて `NodeId` で指す。
//! 親へのリンクも添字なので、循環チェックは親をたどるだけ。

use log::debug;
use serde::Serialize;

use crate::config::board::{BOARD_CELLS, FIELD_WIDTH, MAX_PATH_DEPTH};
use crate::logic::field::Field;

/// アリーナ内のノード番号。ルートは常に 0。
pub type NodeId = usize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathNode {
    pub position: usize,
    pub depth: usize,
    pub children: Vec<NodeId>,
    pub parent: Option<NodeId>,
}

/// 探索結果の木。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTree {
    nodes: Vec<PathNode>,
}

impl PathTree {
    pub const ROOT: NodeId = 0;

    fn with_root(position: usize) -> Self {
        Self {
            nodes: vec![PathNode {
                position,
                depth: 0,
                children: Vec::new(),
                parent: None,
            }],
        }
    }

    pub fn root(&self) -> &PathNode {
        &self.nodes[Self::ROOT]
    }

    pub fn nodes(&self) -> &[PathNode] {
        &self.nodes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// ルートから1手でも動かせる先があるか。
    pub fn has_moves(&self) -> bool {
        !self.root().children.is_empty()
    }

    /// 親→子の辺を `(from, to, 子の深さ)` で列挙する。ホストの矢印描画用。
    pub fn edges(&self) -> Vec<(usize, usize, usize)> {
        self.nodes
            .iter()
            .flat_map(|node| {
                node.children.iter().map(move |&child| {
                    let child = &self.nodes[child];
                    (node.position, child.position, child.depth)
                })
            })
            .collect()
    }

    /// ルートから指定ノードまでの位置の並び。
    pub fn path_to(&self, id: NodeId) -> Vec<usize> {
        let mut path = Vec::new();
        let mut current = self.nodes.get(id);
        while let Some(node) = current {
            path.push(node.position);
            current = node.parent.and_then(|parent| self.nodes.get(parent));
        }
        path.reverse();
        path
    }

    /// 子を持たないノード (ルートは除く)。
    pub fn leaves(&self) -> Vec<NodeId> {
        (1..self.nodes.len())
            .filter(|&id| self.nodes[id].children.is_empty())
            .collect()
    }

    fn add_child(&mut self, parent: NodeId, position: usize) -> NodeId {
        let id = self.nodes.len();
        let depth = self.nodes[parent].depth + 1;
        self.nodes.push(PathNode {
            position,
            depth,
            children: Vec::new(),
            parent: Some(parent),
        });
        self.nodes[parent].children.push(id);
        id
    }

    /// `id` かその祖先のどれかが `position` にいるか。
    fn visits(&self, id: NodeId, position: usize) -> bool {
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = &self.nodes[node_id];
            if node.position == position {
                return true;
            }
            current = node.parent;
        }
        false
    }

    /// ルートから届くノードだけを詰め直して、番号を振り直す。
    fn compact(self) -> Self {
        let mut remap = vec![None; self.nodes.len()];
        let mut order = vec![Self::ROOT];
        let mut next = 0;
        while next < order.len() {
            let id = order[next];
            remap[id] = Some(next);
            order.extend(self.nodes[id].children.iter().copied());
            next += 1;
        }

        let nodes = order
            .iter()
            .map(|&old| {
                let node = &self.nodes[old];
                PathNode {
                    position: node.position,
                    depth: node.depth,
                    children: node.children.iter().filter_map(|&c| remap[c]).collect(),
                    parent: node.parent.and_then(|p| remap[p]),
                }
            })
            .collect();
        Self { nodes }
    }
}

/// 盤面を借りてヒント探索をする人。
pub struct PathFinder<'a> {
    field: &'a Field,
    max_depth: usize,
}

impl<'a> PathFinder<'a> {
    pub fn new(field: &'a Field) -> Self {
        Self::with_max_depth(field, MAX_PATH_DEPTH)
    }

    /// 探索の深さ上限を指定する。再帰を有界にするため 1..=16 に丸める。
    pub fn with_max_depth(field: &'a Field, max_depth: usize) -> Self {
        Self {
            field,
            max_depth: max_depth.clamp(1, MAX_PATH_DEPTH),
        }
    }

    /// `start` から辿れる移動の木を作って、行き止まりの枝を刈り込んで返す。
    pub fn compute(&self, start: usize) -> PathTree {
        let mut tree = PathTree::with_root(start);
        self.expand(&mut tree, PathTree::ROOT);
        let expanded = tree.node_count();
        self.prune(&mut tree, PathTree::ROOT);
        let tree = tree.compact();
        debug!(
            "PathFinder: start {} expanded {} nodes, kept {}",
            start,
            expanded,
            tree.node_count()
        );
        tree
    }

    fn expand(&self, tree: &mut PathTree, id: NodeId) {
        let (position, depth) = {
            let node = &tree.nodes[id];
            (node.position, node.depth)
        };
        if depth >= self.max_depth {
            return;
        }
        let card = self.field.card_at(position);
        if card.is_nil() || card.is_hidden() {
            return;
        }

        for candidate in self.candidates(position) {
            if tree.visits(id, candidate) {
                continue;
            }
            let child = tree.add_child(id, candidate);
            self.expand(tree, child);
        }
    }

    /// カードを置ける候補セル。
    /// K は他の列の0行目 (その列の手前が空か、K じゃない表向きカードのとき)。
    /// それ以外は色違いで1つ上のランクのカードのすぐ下。
    fn candidates(&self, position: usize) -> Vec<usize> {
        let card = self.field.card_at(position);
        let own_col = Field::column_of(position);

        if card.is_king() {
            if Field::row_of(position) == 0 {
                return Vec::new();
            }
            return (0..FIELD_WIDTH)
                .filter(|&col| col != own_col)
                .filter(|&col| {
                    self.field.get_front(col).map_or(false, |front| {
                        let front_card = self.field.card_at(front);
                        front_card.is_nil() || (!front_card.is_hidden() && !front_card.is_king())
                    })
                })
                .collect();
        }

        self.field
            .placement_targets(position)
            .into_iter()
            .filter(|&target| Field::column_of(target) != own_col)
            .map(|target| target + FIELD_WIDTH)
            .filter(|&below| below < BOARD_CELLS)
            .collect()
    }

    /// 後順で刈り込み。子がなくなって、しかも盤面のそのセルが空のノードは落とす。
    /// ルートは残す。戻り値は「親から見て残すかどうか」。
    fn prune(&self, tree: &mut PathTree, id: NodeId) -> bool {
        let children = std::mem::take(&mut tree.nodes[id].children);
        let kept: Vec<NodeId> = children
            .into_iter()
            .filter(|&child| self.prune(tree, child))
            .collect();
        let is_dead = kept.is_empty() && self.field.card_at(tree.nodes[id].position).is_nil();
        tree.nodes[id].children = kept;
        id == PathTree::ROOT || !is_dead
    }
}
