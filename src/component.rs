//! Reading a component's props and state into records

use propr_abi::{FromMap, Map, Value};
use tracing::debug;

use crate::Error;

pub const PROPS_KEY: &str = "props";
pub const STATE_KEY: &str = "state";

/// A component instance as exposed by the UI runtime.
pub trait Component {
    /// Read a property of the instance (`this.props`, `this.state`, ...).
    fn get(&self, key: &str) -> Option<Value>;

    fn props(&self) -> Result<Map, Error> {
        map_at(self, PROPS_KEY)
    }

    fn state(&self) -> Result<Map, Error> {
        map_at(self, STATE_KEY)
    }
}

fn map_at<C: Component + ?Sized>(component: &C, key: &'static str) -> Result<Map, Error> {
    match component.get(key) {
        Some(Value::Map(map)) => Ok(map),
        Some(other) => Err(Error::NotAMap { key, got: other.kind() }),
        None => Err(Error::NotAMap { key, got: "nothing" }),
    }
}

/// Decode the component's props into `dest`.
pub fn unmarshal_props<C, T>(this: &C, dest: &mut T) -> Result<(), Error>
where
    C: Component + ?Sized,
    T: FromMap,
{
    let props = this.props()?;
    debug!(keys = props.len(), "unmarshalling props");
    propr_abi::from_map(&props, dest)?;
    Ok(())
}

/// Decode the component's state into `dest`.
pub fn unmarshal_state<C, T>(this: &C, dest: &mut T) -> Result<(), Error>
where
    C: Component + ?Sized,
    T: FromMap,
{
    let state = this.state()?;
    debug!(keys = state.len(), "unmarshalling state");
    propr_abi::from_map(&state, dest)?;
    Ok(())
}

#[deprecated(note = "use unmarshal_props")]
pub fn hydrate_props<C, T>(this: &C, dest: &mut T) -> Result<(), Error>
where
    C: Component + ?Sized,
    T: FromMap,
{
    unmarshal_props(this, dest)
}

#[deprecated(note = "use unmarshal_state")]
pub fn hydrate_state<C, T>(this: &C, dest: &mut T) -> Result<(), Error>
where
    C: Component + ?Sized,
    T: FromMap,
{
    unmarshal_state(this, dest)
}

/// A detached copy of a component's props and state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub props: Map,
    pub state: Map,
}

impl Snapshot {
    pub fn new(props: Map, state: Map) -> Self {
        Self { props, state }
    }

    /// Build from a `{"props": {..}, "state": {..}}` value. Missing sections
    /// are empty.
    pub fn from_value(value: Value) -> Result<Self, Error> {
        let mut map = match value {
            Value::Map(map) => map,
            other => return Err(Error::NotAMap { key: "snapshot", got: other.kind() }),
        };
        Ok(Self {
            props: take_section(&mut map, PROPS_KEY)?,
            state: take_section(&mut map, STATE_KEY)?,
        })
    }
}

fn take_section(map: &mut Map, key: &'static str) -> Result<Map, Error> {
    match map.remove(key) {
        Some(Value::Map(section)) => Ok(section),
        Some(Value::Null) | None => Ok(Map::new()),
        Some(other) => Err(Error::NotAMap { key, got: other.kind() }),
    }
}

impl Component for Snapshot {
    fn get(&self, key: &str) -> Option<Value> {
        match key {
            PROPS_KEY => Some(Value::Map(self.props.clone())),
            STATE_KEY => Some(Value::Map(self.state.clone())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Bare;

    impl Component for Bare {
        fn get(&self, key: &str) -> Option<Value> {
            (key == PROPS_KEY).then(|| Value::from("not a map"))
        }
    }

    #[test]
    fn non_map_sections_are_rejected() {
        assert!(matches!(
            Bare.props(),
            Err(Error::NotAMap { key: "props", got: "string" })
        ));
        assert!(matches!(
            Bare.state(),
            Err(Error::NotAMap { key: "state", got: "nothing" })
        ));
    }

    #[test]
    fn snapshot_sections_default_to_empty() {
        let mut root = Map::new();
        let mut props = Map::new();
        props.insert("a".to_string(), Value::Bool(true));
        root.insert(PROPS_KEY.to_string(), Value::Map(props.clone()));

        let snapshot = Snapshot::from_value(Value::Map(root)).unwrap();
        assert_eq!(snapshot.props, props);
        assert!(snapshot.state.is_empty());
        assert!(Snapshot::from_value(Value::Bool(true)).is_err());
    }
}
