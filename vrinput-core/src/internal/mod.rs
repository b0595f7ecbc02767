pub mod binding_table;
pub mod buffer_pool;

pub mod types {
    pub type HashMap<K, V> = hashbrown::HashMap<K, V>;
}
