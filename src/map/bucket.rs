// src/map/bucket.rs
//! 桶实现 - 管理单个桶位的条目链表

use crate::types::{Key, Value};
use std::{fmt, mem};

/// 链表条目 - 单个键值对节点
struct Entry<V> {
    key: Key,
    value: V,
    next: Option<Box<Entry<V>>>,
}

/// 桶 - 头插法维护的单链表
///
/// 桶本身不含锁，同一桶内每个键至多出现一次。
/// 并发控制由上层的桶级互斥锁提供。
pub struct Bucket<V: Value> {
    head: Option<Box<Entry<V>>>,
}

impl<V: Value> Bucket<V> {
    pub fn new() -> Self {
        Self { head: None }
    }

    /// 查找指定键的值
    pub fn get(&self, key: Key) -> Option<V> {
        let mut cursor = self.head.as_deref();
        while let Some(entry) = cursor {
            if entry.key == key {
                return Some(entry.value.clone());
            }
            cursor = entry.next.as_deref();
        }
        None
    }

    /// 写入键值对，返回被覆盖的旧值
    ///
    /// 键已存在时原地覆盖，否则在链头插入新条目。
    pub fn put(&mut self, key: Key, value: V) -> Option<V> {
        let mut cursor = self.head.as_deref_mut();
        while let Some(entry) = cursor {
            if entry.key == key {
                return Some(mem::replace(&mut entry.value, value));
            }
            cursor = entry.next.as_deref_mut();
        }

        let next = self.head.take();
        self.head = Some(Box::new(Entry { key, value, next }));
        None
    }

    /// 摘除指定键的条目，返回其值
    ///
    /// 链头命中时修正头指针，否则修正前驱的后继指针。
    pub fn remove(&mut self, key: Key) -> Option<V> {
        let mut link = &mut self.head;
        while link.as_ref().is_some_and(|entry| entry.key != key) {
            link = &mut link.as_mut()?.next;
        }

        let mut removed = link.take()?;
        *link = removed.next.take();
        Some(removed.value)
    }

    /// 按链表顺序遍历条目
    pub fn iter(&self) -> ChainIter<'_, V> {
        ChainIter {
            cursor: self.head.as_deref(),
        }
    }

    /// 链表长度
    pub fn chain_len(&self) -> usize {
        self.iter().count()
    }

    /// 检查桶是否为空
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }
}

impl<V: Value> Default for Bucket<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Value> fmt::Debug for Bucket<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bucket(len: {})", self.chain_len())
    }
}

impl<V: Value> Drop for Bucket<V> {
    fn drop(&mut self) {
        // 迭代释放，深链表递归析构会压爆栈
        let mut cursor = self.head.take();
        while let Some(mut entry) = cursor {
            cursor = entry.next.take();
        }
    }
}

/// 链表迭代器
pub struct ChainIter<'a, V> {
    cursor: Option<&'a Entry<V>>,
}

impl<'a, V> Iterator for ChainIter<'a, V> {
    type Item = (Key, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.cursor?;
        self.cursor = entry.next.as_deref();
        Some((entry.key, &entry.value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_items() -> Vec<(Key, String)> {
        vec![
            (1, "value1".to_string()),
            (2, "value2".to_string()),
            (3, "value3".to_string()),
            (4, "value4".to_string()),
        ]
    }

    #[test]
    fn test_new_bucket() {
        let bucket: Bucket<String> = Bucket::new();
        assert!(bucket.is_empty());
        assert_eq!(bucket.chain_len(), 0);
    }

    #[test]
    fn test_put_and_get() {
        let mut bucket = Bucket::new();
        for (key, value) in test_items() {
            assert_eq!(bucket.put(key, value), None);
        }

        for (key, value) in test_items() {
            assert_eq!(bucket.get(key), Some(value));
        }
        assert_eq!(bucket.get(99), None);
        assert_eq!(bucket.chain_len(), 4);
    }

    #[test]
    fn test_put_updates_in_place() {
        let mut bucket = Bucket::new();
        assert_eq!(bucket.put(7, "old".to_string()), None);
        assert_eq!(bucket.put(7, "new".to_string()), Some("old".to_string()));

        // 更新不得产生重复条目
        assert_eq!(bucket.chain_len(), 1);
        assert_eq!(bucket.get(7), Some("new".to_string()));
    }

    #[test]
    fn test_head_insertion_order() {
        let mut bucket = Bucket::new();
        bucket.put(1, 100);
        bucket.put(2, 200);
        bucket.put(3, 300);

        // 头插法：最新条目在链头
        let keys: Vec<Key> = bucket.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec![3, 2, 1]);
    }

    #[test]
    fn test_remove_head() {
        let mut bucket = Bucket::new();
        bucket.put(1, 100);
        bucket.put(2, 200);

        // 链头为2
        assert_eq!(bucket.remove(2), Some(200));
        assert_eq!(bucket.get(2), None);
        assert_eq!(bucket.get(1), Some(100));
        assert_eq!(bucket.chain_len(), 1);
    }

    #[test]
    fn test_remove_middle_and_tail() {
        let mut bucket = Bucket::new();
        for key in 1..=5 {
            bucket.put(key, key * 10);
        }

        // 链表为 5 -> 4 -> 3 -> 2 -> 1，摘除中间与尾部
        assert_eq!(bucket.remove(3), Some(30));
        assert_eq!(bucket.remove(1), Some(10));

        let keys: Vec<Key> = bucket.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec![5, 4, 2]);
    }

    #[test]
    fn test_remove_missing_key() {
        let mut bucket = Bucket::new();
        bucket.put(1, 100);
        assert_eq!(bucket.remove(42), None);
        assert_eq!(bucket.chain_len(), 1);
    }

    #[test]
    fn test_remove_from_empty_bucket() {
        let mut bucket: Bucket<i64> = Bucket::new();
        assert_eq!(bucket.remove(1), None);
    }

    #[test]
    fn test_reinsert_after_remove() {
        let mut bucket = Bucket::new();
        bucket.put(9, "a".to_string());
        assert_eq!(bucket.remove(9), Some("a".to_string()));
        assert_eq!(bucket.put(9, "b".to_string()), None);
        assert_eq!(bucket.get(9), Some("b".to_string()));
    }

    #[test]
    fn test_deep_chain_drop() {
        // 深链表析构不得递归压栈，直接头插构造避免逐次遍历
        let mut bucket = Bucket::new();
        for key in 0..500_000 {
            let next = bucket.head.take();
            bucket.head = Some(Box::new(Entry { key, value: key, next }));
        }
        assert_eq!(bucket.get(0), Some(0));
        drop(bucket);
    }

    #[test]
    fn test_iter_values() {
        let mut bucket = Bucket::new();
        bucket.put(1, "one".to_string());
        bucket.put(2, "two".to_string());

        let collected: Vec<(Key, String)> =
            bucket.iter().map(|(k, v)| (k, v.clone())).collect();
        assert_eq!(
            collected,
            vec![(2, "two".to_string()), (1, "one".to_string())]
        );
    }
}
