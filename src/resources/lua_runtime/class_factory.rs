//! Class emulation for scripts.
//!
//! `createClass()` returns a class table. Calling the class table creates an
//! instance whose missing fields are looked up in the class, then runs the
//! class's `__init__` (if any) with the instance:
//!
//! ```lua
//! Ship = createClass()
//! function Ship:__init__() self.hull = 100 end
//! function Ship:damage(n) self.hull = self.hull - n end
//!
//! local a = Ship()
//! a:damage(10)   -- a.hull == 90, other instances are unaffected
//! ```
//!
//! Delegation is one level deep: instance -> class.

use mlua::prelude::*;

/// Key under which the class metatable keeps its instance metatable.
const INSTANCE_METATABLE: &str = "__instance";

/// Creates an empty class table.
pub fn create_class(lua: &Lua) -> LuaResult<LuaTable> {
    let class = lua.create_table()?;
    let class_meta = lua.create_table()?;
    let instance_meta = lua.create_table()?;

    instance_meta.set("__index", class.clone())?;
    class_meta.set(INSTANCE_METATABLE, instance_meta)?;
    class_meta.set("__call", lua.create_function(construct)?)?;
    class.set_metatable(Some(class_meta))?;
    Ok(class)
}

/// `__call` handler: allocates an instance of `class`.
///
/// Constructor arguments are ignored; `__init__` only receives the instance.
fn construct(lua: &Lua, (class, _args): (LuaTable, LuaMultiValue)) -> LuaResult<LuaTable> {
    let instance_meta: LuaTable = class
        .metatable()
        .ok_or_else(|| LuaError::runtime("createClass: class table lost its metatable"))?
        .get(INSTANCE_METATABLE)?;

    let instance = lua.create_table()?;
    instance.set_metatable(Some(instance_meta))?;

    if let LuaValue::Function(init) = instance.get::<LuaValue>("__init__")? {
        init.call::<()>(instance.clone())?;
    }
    Ok(instance)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lua_with_factory() -> Lua {
        let lua = Lua::new();
        lua.globals()
            .set(
                "createClass",
                lua.create_function(|lua, ()| create_class(lua)).unwrap(),
            )
            .unwrap();
        lua
    }

    #[test]
    fn test_instances_are_independent() {
        let lua = lua_with_factory();
        let (a, b): (i64, i64) = lua
            .load(
                r#"
                local C = createClass()
                function C:__init__() self.value = 1 end
                local a = C()
                local b = C()
                a.value = 42
                return a.value, b.value
            "#,
            )
            .eval()
            .unwrap();
        assert_eq!(a, 42);
        assert_eq!(b, 1);
    }

    #[test]
    fn test_methods_delegate_to_class() {
        let lua = lua_with_factory();
        let hull: i64 = lua
            .load(
                r#"
                local Ship = createClass()
                function Ship:__init__() self.hull = 100 end
                function Ship:damage(n) self.hull = self.hull - n end
                local s = Ship()
                s:damage(30)
                return s.hull
            "#,
            )
            .eval()
            .unwrap();
        assert_eq!(hull, 70);
    }

    #[test]
    fn test_methods_added_later_are_visible() {
        let lua = lua_with_factory();
        let name: String = lua
            .load(
                r#"
                local C = createClass()
                local obj = C()
                function C:name() return "late" end
                return obj:name()
            "#,
            )
            .eval()
            .unwrap();
        assert_eq!(name, "late");
    }

    #[test]
    fn test_no_init_is_fine() {
        let lua = lua_with_factory();
        let is_table: bool = lua
            .load(r#"local C = createClass(); return type(C()) == "table""#)
            .eval()
            .unwrap();
        assert!(is_table);
    }

    #[test]
    fn test_init_return_value_is_discarded() {
        let lua = lua_with_factory();
        let same: bool = lua
            .load(
                r#"
                local C = createClass()
                function C:__init__() return "ignored" end
                local obj = C()
                return getmetatable(obj).__index == C
            "#,
            )
            .eval()
            .unwrap();
        assert!(same);
    }

    #[test]
    fn test_init_error_propagates() {
        let lua = lua_with_factory();
        let err = lua
            .load(
                r#"
                local C = createClass()
                function C:__init__() error("bad init") end
                return C()
            "#,
            )
            .exec()
            .unwrap_err();
        assert!(err.to_string().contains("bad init"));
    }
}
