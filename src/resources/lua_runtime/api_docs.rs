//! Documentation for the global host API.
//!
//! Drives the EmmyLua stub generator and the `.luarc.json` globals list.
//! Every entry names a global installed by `register_host_api`.

/// One documented global function.
#[derive(Debug, Clone, Copy)]
pub struct ApiFunctionDoc {
    pub name: &'static str,
    pub category: &'static str,
    /// `(name, type)` pairs; a type ending in `?` is optional.
    pub params: &'static [(&'static str, &'static str)],
    pub returns: Option<&'static str>,
    pub description: &'static str,
}

/// Category display order for generated files.
pub const API_CATEGORIES: &[(&str, &str)] = &[
    ("base", "Base Functions"),
    ("entity", "Entities and Classes"),
    ("scenario", "Scenario Flow"),
    ("sector", "Sector Names"),
    ("gm", "Game Master"),
    ("comms", "Comms"),
];

pub const HOST_API_DOCS: &[ApiFunctionDoc] = &[
    // base
    ApiFunctionDoc {
        name: "random",
        category: "base",
        params: &[("min", "number"), ("max", "number")],
        returns: Some("number"),
        description: "Returns a random float between min and max.",
    },
    ApiFunctionDoc {
        name: "irandom",
        category: "base",
        params: &[("min", "integer"), ("max", "integer")],
        returns: Some("integer"),
        description: "Returns a random integer between min and max, both inclusive.",
    },
    ApiFunctionDoc {
        name: "print",
        category: "base",
        params: &[("...", "any")],
        returns: None,
        description: "Writes the arguments to the console. Tables are shown one level deep.",
    },
    ApiFunctionDoc {
        name: "require",
        category: "base",
        params: &[("filename", "string")],
        returns: Some("any"),
        description: "Runs a script file in the current environment and returns its results. \
                      Loads the file's translations as well.",
    },
    ApiFunctionDoc {
        name: "_",
        category: "base",
        params: &[("text", "string"), ("text_or_nil", "string?")],
        returns: Some("string"),
        description: "Translates text. With two arguments the first one is the translation context.",
    },
    ApiFunctionDoc {
        name: "getEEVersion",
        category: "base",
        params: &[],
        returns: Some("integer"),
        description: "Returns the engine version as major * 10000 + minor * 100 + patch.",
    },
    // entity
    ApiFunctionDoc {
        name: "createEntity",
        category: "entity",
        params: &[],
        returns: Some("integer"),
        description: "Creates an empty entity and returns its id.",
    },
    ApiFunctionDoc {
        name: "getLuaEntityFunctionTable",
        category: "entity",
        params: &[],
        returns: Some("table"),
        description: "Returns the table holding functions shared by all script entities.",
    },
    ApiFunctionDoc {
        name: "createClass",
        category: "entity",
        params: &[],
        returns: Some("table"),
        description: "Creates a class table. Calling it creates an instance and runs __init__.",
    },
    // scenario
    ApiFunctionDoc {
        name: "getScenarioSetting",
        category: "scenario",
        params: &[("key", "string")],
        returns: Some("string"),
        description: "Returns the value of a scenario setting, or an empty string.",
    },
    ApiFunctionDoc {
        name: "getScenarioVariation",
        category: "scenario",
        params: &[],
        returns: Some("string"),
        description: "Deprecated. Returns the `variation` setting, or \"None\".",
    },
    ApiFunctionDoc {
        name: "onNewPlayerShip",
        category: "scenario",
        params: &[("callback", "function")],
        returns: None,
        description: "Sets the function called with the entity id of every new player ship.",
    },
    ApiFunctionDoc {
        name: "globalMessage",
        category: "scenario",
        params: &[("text", "string"), ("timeout", "number?")],
        returns: None,
        description: "Shows a message on all main screens for timeout seconds.",
    },
    ApiFunctionDoc {
        name: "victory",
        category: "scenario",
        params: &[("faction", "string")],
        returns: None,
        description: "Ends the scenario with a victory for the given faction.",
    },
    ApiFunctionDoc {
        name: "setBanner",
        category: "scenario",
        params: &[("text", "string")],
        returns: None,
        description: "Sets the scrolling banner text.",
    },
    ApiFunctionDoc {
        name: "getScenarioTime",
        category: "scenario",
        params: &[],
        returns: Some("number"),
        description: "Returns the seconds the scenario has been running, pauses excluded.",
    },
    // sector
    ApiFunctionDoc {
        name: "getSectorName",
        category: "sector",
        params: &[("x", "number"), ("y", "number")],
        returns: Some("string"),
        description: "Returns the name of the sector containing a world position.",
    },
    ApiFunctionDoc {
        name: "sectorToXY",
        category: "sector",
        params: &[("sector", "string")],
        returns: Some("number, number"),
        description: "Returns the top-left corner of a sector. Invalid names give 0, 0.",
    },
    // gm
    ApiFunctionDoc {
        name: "addGMFunction",
        category: "gm",
        params: &[("label", "string"), ("callback", "function")],
        returns: None,
        description: "Adds a button to the game master screen.",
    },
    ApiFunctionDoc {
        name: "clearGMFunctions",
        category: "gm",
        params: &[],
        returns: None,
        description: "Removes all game master buttons.",
    },
    ApiFunctionDoc {
        name: "Script",
        category: "gm",
        params: &[],
        returns: Some("Script"),
        description: "Creates a separate script environment. Use :run(filename) and \
                      :setVariable(name, value) on the result.",
    },
    // comms
    ApiFunctionDoc {
        name: "setCommsMessage",
        category: "comms",
        params: &[("text", "string")],
        returns: None,
        description: "Sets the message shown on the comms screen.",
    },
    ApiFunctionDoc {
        name: "addCommsReply",
        category: "comms",
        params: &[("label", "string"), ("callback", "function")],
        returns: None,
        description: "Adds a reply option. The callback gets the source and target entity ids.",
    },
    ApiFunctionDoc {
        name: "commsSwitchToGM",
        category: "comms",
        params: &[],
        returns: None,
        description: "Hands the current conversation to the game master.",
    },
];
