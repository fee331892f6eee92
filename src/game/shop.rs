//! 商店系統
//!
//! 每次進入商店時從可販售的 Joker 中抽出不重複的幾張

use rand::prelude::*;
use rand::rngs::StdRng;

use super::joker::JokerId;

/// 商店物品
#[derive(Clone, Debug, PartialEq)]
pub struct ShopItem {
    pub joker: JokerId,
    pub cost: i64,
}

impl ShopItem {
    pub fn new(joker: JokerId) -> Self {
        Self {
            joker,
            cost: joker.cost(),
        }
    }
}

/// 商店
#[derive(Clone, Debug, Default)]
pub struct Shop {
    pub items: Vec<ShopItem>,
}

impl Shop {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// 刷新商店物品（同一次刷新內不重複）
    pub fn refresh(&mut self, rng: &mut StdRng, item_count: usize) {
        let available = JokerId::all_shop_eligible();
        self.items = available
            .choose_multiple(rng, item_count)
            .map(|&id| ShopItem::new(id))
            .collect();
    }

    pub fn item(&self, index: usize) -> Option<&ShopItem> {
        self.items.get(index)
    }

    /// 取出指定索引的物品
    pub fn buy(&mut self, index: usize) -> Option<ShopItem> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

// ============================================================================
// 單元測試
// ============================================================================
