//! 墙体注册表 - 快照中墙体集合的只读视图

use crate::authoring::wall_label;
use crate::entity::{EntityId, Wall};

/// 墙体只读视图
///
/// 迭代顺序即存储中的插入顺序。
#[derive(Debug, Clone, Copy)]
pub struct WallRegistry<'a> {
    walls: &'a [Wall],
}

impl<'a> WallRegistry<'a> {
    pub fn new(walls: &'a [Wall]) -> Self {
        Self { walls }
    }

    /// 所有墙体（含零长度墙体）
    pub fn iter(&self) -> impl Iterator<Item = &'a Wall> {
        self.walls.iter()
    }

    /// 参与几何查询的墙体，跳过零长度墙体
    pub fn geometric(&self) -> impl Iterator<Item = &'a Wall> {
        self.walls.iter().filter(|w| !w.is_degenerate())
    }

    pub fn get(&self, id: EntityId) -> Option<&'a Wall> {
        self.walls.iter().find(|w| w.id == id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    pub fn find_by_label(&self, label: &str) -> Option<&'a Wall> {
        self.walls.iter().find(|w| w.label == label)
    }

    pub fn len(&self) -> usize {
        self.walls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.walls.is_empty()
    }

    /// 下一面墙的标签，按当前墙体数量编号
    pub fn next_label(&self) -> String {
        wall_label(self.walls.len())
    }
}
