// Local persistence for UI preferences.

pub mod layout_store;
