// Adapters layer: concrete implementations of the domain ports.

pub mod firestore;

pub use firestore::FirestoreStore;
