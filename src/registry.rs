//! # Command Registry
//!
//! Every remote operation the CLI exposes is one [`CommandSpec`] entry in
//! [`COMMANDS`]. An entry says where the command lives in the command tree,
//! which positional arguments and flags it takes, which endpoint it calls and
//! how the result is displayed. The binary builds its clap command tree from
//! this table and [`crate::dispatch::Dispatcher`] executes any entry the same
//! way, so adding a command means adding data, not code.
//!
//! Identifier arguments carry an [`IdKind`]. Spaces, types and members are
//! resolved from human-friendly names; everything else is forwarded verbatim.

use serde_json::Value;

use crate::backend::{Endpoint, Method, Request};
use crate::view::{Column, DetailView, Field, Section, TableView, View};

/// How an identifier argument is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdKind {
    /// Resolved against the list of spaces.
    Space,
    /// Resolved against the types of the space given earlier.
    Type,
    /// Resolved against the members of the space given earlier.
    Member,
    /// Forwarded as typed.
    Literal,
}

/// Where the value of a positional argument goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Fills the next `{}` slot of the endpoint path.
    Path,
    /// Takes one or more values and stores them as a JSON array in the body.
    BodyList(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Positional {
    pub name: &'static str,
    pub help: &'static str,
    pub kind: IdKind,
    pub target: Target,
}

impl Positional {
    const fn path(name: &'static str, help: &'static str, kind: IdKind) -> Self {
        Self {
            name,
            help,
            kind,
            target: Target::Path,
        }
    }

    /// Whether the argument accepts several values.
    pub fn is_variadic(&self) -> bool {
        matches!(self.target, Target::BodyList(_))
    }
}

/// Where the value of a flag goes. Body paths are dot-separated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagTarget {
    /// A string at `path` in the request body.
    Body(&'static str),
    /// Comma-separated values as an array at `path`.
    List(&'static str),
    /// An emoji icon object (`{"format": "emoji", "emoji": ...}`) at `path`.
    Emoji(&'static str),
    /// An identifier appended after the positional ones; its presence selects
    /// the endpoint with one more slot.
    Id(IdKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flag {
    pub name: &'static str,
    pub help: &'static str,
    pub required: bool,
    pub default: Option<&'static str>,
    pub choices: &'static [&'static str],
    /// Another flag this one only applies together with.
    pub only_with: Option<&'static str>,
    pub target: FlagTarget,
}

impl Flag {
    const fn new(name: &'static str, help: &'static str, target: FlagTarget) -> Self {
        Self {
            name,
            help,
            required: false,
            default: None,
            choices: &[],
            only_with: None,
            target,
        }
    }

    const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    const fn default_value(mut self, value: &'static str) -> Self {
        self.default = Some(value);
        self
    }

    const fn choices(mut self, choices: &'static [&'static str]) -> Self {
        self.choices = choices;
        self
    }

    const fn only_with(mut self, flag: &'static str) -> Self {
        self.only_with = Some(flag);
        self
    }
}

/// One command of the CLI.
#[derive(Clone, Copy)]
pub struct CommandSpec {
    /// Position in the command tree, e.g. `["spaces", "list"]`.
    pub path: &'static [&'static str],
    pub about: &'static str,
    pub positionals: &'static [Positional],
    pub flags: &'static [Flag],
    /// Candidate endpoints; the one whose slot count matches the number of
    /// identifiers supplied is used.
    pub endpoints: &'static [Endpoint],
    pub view: View,
}

impl CommandSpec {
    /// Space-separated command path, e.g. `"spaces list"`.
    pub fn name(&self) -> String {
        self.path.join(" ")
    }

    /// The endpoint taking exactly `ids` identifiers.
    pub fn endpoint_for(&self, ids: usize) -> Option<Endpoint> {
        self.endpoints.iter().copied().find(|e| e.slots() == ids)
    }
}

/// Help text of the intermediate command groups.
pub const GROUPS: &[(&str, &str)] = &[
    ("spaces", "Manage Anytype spaces"),
    ("objects", "Manage Anytype objects"),
    ("members", "Manage space members"),
    ("types", "Manage object types"),
    ("lists", "Manage lists and views"),
];

const SPACE: Positional = Positional::path(
    "space",
    "Space ID or name (partial names work when unambiguous)",
    IdKind::Space,
);
const OBJECT: Positional = Positional::path("object", "Object ID", IdKind::Literal);
const MEMBER: Positional = Positional::path("member", "Member ID or name", IdKind::Member);
const TYPE: Positional = Positional::path("type", "Type ID or name", IdKind::Type);
const TEMPLATE: Positional = Positional::path("template", "Template ID", IdKind::Literal);
const LIST: Positional = Positional::path("list", "List (collection or set) object ID", IdKind::Literal);
const LIST_VIEW: Positional = Positional::path("view", "View ID", IdKind::Literal);

const fn get(path: &'static str) -> Endpoint {
    Endpoint::new(Method::Get, path)
}

const fn post(path: &'static str) -> Endpoint {
    Endpoint::new(Method::Post, path)
}

const fn delete(path: &'static str) -> Endpoint {
    Endpoint::new(Method::Delete, path)
}

const OBJECT_COLUMNS: &[Column] = &[
    Column::new("OBJECT ID", "/id"),
    Column::new("NAME", "/name").capped(30),
    Column::new("TYPE", "/type/key").capped(20),
    Column::new("LAYOUT", "/layout").capped(20),
];

const ICON: Field = Field::new("Icon", "/icon/emoji|/icon/name");

fn objects_added(request: &Request, _: &Value) -> String {
    let objects: Vec<&str> = request
        .body
        .as_ref()
        .and_then(|b| b.get("objects"))
        .and_then(Value::as_array)
        .map(|ids| ids.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();
    let list = request.ids.get(1).map(String::as_str).unwrap_or_default();

    let mut out = format!(
        "Successfully added {} object(s) to list {}\n",
        objects.len(),
        list
    );
    for (i, id) in objects.iter().enumerate() {
        out.push_str(&format!("  {}. {}\n", i + 1, id));
    }
    out
}

fn object_removed(request: &Request, _: &Value) -> String {
    let id = |i: usize| request.ids.get(i).map(String::as_str).unwrap_or_default();
    format!("Successfully removed object {} from list {}\n", id(2), id(1))
}

/// Every registry-driven command, in help order.
pub const COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        path: &["spaces", "list"],
        about: "List all spaces",
        positionals: &[],
        flags: &[],
        endpoints: &[get("/v1/spaces")],
        view: View::Table(TableView {
            collection: "/data",
            noun: "spaces",
            columns: &[
                Column::new("SPACE ID", "/id"),
                Column::new("NAME", "/name").capped(20),
                Column::new("DESCRIPTION", "/description").capped(30),
            ],
        }),
    },
    CommandSpec {
        path: &["spaces", "get"],
        about: "Get details of a specific space",
        positionals: &[SPACE],
        flags: &[],
        endpoints: &[get("/v1/spaces/{}")],
        view: View::Detail(DetailView {
            title: "SPACE DETAILS",
            subject: "/space",
            fields: &[
                Field::new("ID", "/id"),
                Field::new("Name", "/name"),
                Field::new("Description", "/description"),
                Field::new("Network ID", "/network_id"),
                Field::new("Gateway URL", "/gateway_url"),
                ICON,
            ],
            sections: &[],
        }),
    },
    CommandSpec {
        path: &["spaces", "create"],
        about: "Create a new space",
        positionals: &[],
        flags: &[
            Flag::new("name", "Name for the new space", FlagTarget::Body("name")).required(),
            Flag::new("description", "Description for the new space", FlagTarget::Body("description")),
            Flag::new("icon", "Emoji icon for the space", FlagTarget::Emoji("icon")),
        ],
        endpoints: &[post("/v1/spaces")],
        view: View::Detail(DetailView {
            title: "Space created successfully",
            subject: "/space",
            fields: &[
                Field::new("ID", "/id"),
                Field::new("Name", "/name"),
                Field::new("Description", "/description"),
            ],
            sections: &[],
        }),
    },
    CommandSpec {
        path: &["objects", "list"],
        about: "List objects in a space",
        positionals: &[SPACE],
        flags: &[],
        endpoints: &[get("/v1/spaces/{}/objects")],
        view: View::Table(TableView {
            collection: "/data",
            noun: "objects",
            columns: OBJECT_COLUMNS,
        }),
    },
    CommandSpec {
        path: &["objects", "get"],
        about: "Get details of a specific object",
        positionals: &[SPACE, OBJECT],
        flags: &[],
        endpoints: &[get("/v1/spaces/{}/objects/{}")],
        view: View::Detail(DetailView {
            title: "OBJECT DETAILS",
            subject: "/object",
            fields: &[
                Field::new("ID", "/id"),
                Field::new("Name", "/name"),
                Field::new("Type", "/type/key"),
                Field::new("Type Name", "/type/name"),
                Field::new("Layout", "/layout"),
                Field::new("Space ID", "/space_id"),
                Field::new("Archived", "/archived"),
                ICON,
            ],
            sections: &[Section {
                title: "PROPERTIES",
                table: TableView {
                    collection: "/properties",
                    noun: "properties",
                    columns: &[
                        Column::new("NAME", "/name").capped(24),
                        Column::new("FORMAT", "/format"),
                        Column::new(
                            "VALUE",
                            "/text|/number|/select|/multi_select|/date|/checkbox|/url|/email|/phone|/files|/objects",
                        )
                        .capped(50),
                    ],
                },
            }],
        }),
    },
    CommandSpec {
        path: &["objects", "create"],
        about: "Create a new object",
        positionals: &[SPACE],
        flags: &[
            Flag::new("name", "Name for the new object", FlagTarget::Body("name")).required(),
            Flag::new("type", "Type key for the object", FlagTarget::Body("type_key")).default_value("page"),
            Flag::new("description", "Description for the new object", FlagTarget::Body("description")),
            Flag::new("icon", "Emoji icon for the object", FlagTarget::Emoji("icon")),
            Flag::new("body", "Markdown body content for the object", FlagTarget::Body("body")),
            Flag::new("template", "Template ID to use for creating the object", FlagTarget::Body("template_id")),
        ],
        endpoints: &[post("/v1/spaces/{}/objects")],
        view: View::Detail(DetailView {
            title: "Object created successfully",
            subject: "/object",
            fields: &[
                Field::new("ID", "/id"),
                Field::new("Name", "/name"),
                Field::new("Type", "/type/key"),
            ],
            sections: &[],
        }),
    },
    CommandSpec {
        path: &["objects", "delete"],
        about: "Delete (archive) an object",
        positionals: &[SPACE, OBJECT],
        flags: &[],
        endpoints: &[delete("/v1/spaces/{}/objects/{}")],
        view: View::Detail(DetailView {
            title: "Object deleted successfully",
            subject: "/object",
            fields: &[
                Field::new("ID", "/id"),
                Field::new("Name", "/name"),
                Field::new("Archived", "/archived"),
            ],
            sections: &[],
        }),
    },
    CommandSpec {
        path: &["objects", "export"],
        about: "Export an object as markdown",
        positionals: &[SPACE, OBJECT],
        flags: &[],
        endpoints: &[get("/v1/spaces/{}/objects/{}/export/markdown")],
        view: View::Text {
            pointer: "/markdown",
        },
    },
    CommandSpec {
        path: &["members", "list"],
        about: "List all members in a space",
        positionals: &[SPACE],
        flags: &[],
        endpoints: &[get("/v1/spaces/{}/members")],
        view: View::Table(TableView {
            collection: "/data",
            noun: "members",
            columns: &[
                Column::new("MEMBER ID", "/id"),
                Column::new("NAME", "/name").capped(30),
                Column::new("ROLE", "/role"),
                Column::new("STATUS", "/status"),
            ],
        }),
    },
    CommandSpec {
        path: &["members", "get"],
        about: "Get details of a specific member",
        positionals: &[SPACE, MEMBER],
        flags: &[],
        endpoints: &[get("/v1/spaces/{}/members/{}")],
        view: View::Detail(DetailView {
            title: "MEMBER DETAILS",
            subject: "/member",
            fields: &[
                Field::new("ID", "/id"),
                Field::new("Name", "/name"),
                Field::new("Global Name", "/global_name"),
                Field::new("Identity", "/identity"),
                Field::new("Role", "/role"),
                Field::new("Status", "/status"),
                ICON,
            ],
            sections: &[],
        }),
    },
    CommandSpec {
        path: &["types", "list"],
        about: "List all object types in a space",
        positionals: &[SPACE],
        flags: &[],
        endpoints: &[get("/v1/spaces/{}/types")],
        view: View::Table(TableView {
            collection: "/data",
            noun: "types",
            columns: &[
                Column::new("TYPE ID", "/id"),
                Column::new("KEY", "/key").capped(30),
                Column::new("NAME", "/name").capped(30),
                Column::new("LAYOUT", "/layout"),
            ],
        }),
    },
    CommandSpec {
        path: &["types", "get"],
        about: "Get details of a specific object type",
        positionals: &[SPACE, TYPE],
        flags: &[],
        endpoints: &[get("/v1/spaces/{}/types/{}")],
        view: View::Detail(DetailView {
            title: "TYPE DETAILS",
            subject: "/type",
            fields: &[
                Field::new("ID", "/id"),
                Field::new("Key", "/key"),
                Field::new("Name", "/name"),
                Field::new("Plural Name", "/plural_name"),
                Field::new("Layout", "/layout"),
                Field::new("Archived", "/archived"),
                ICON,
            ],
            sections: &[Section {
                title: "PROPERTY DEFINITIONS",
                table: TableView {
                    collection: "/properties",
                    noun: "properties",
                    columns: &[
                        Column::new("KEY", "/key").capped(20),
                        Column::new("NAME", "/name").capped(20),
                        Column::new("FORMAT", "/format").capped(12),
                    ],
                },
            }],
        }),
    },
    CommandSpec {
        path: &["types", "templates"],
        about: "List templates for an object type",
        positionals: &[SPACE, TYPE],
        flags: &[],
        endpoints: &[get("/v1/spaces/{}/types/{}/templates")],
        view: View::Table(TableView {
            collection: "/data",
            noun: "templates",
            columns: &[
                Column::new("TEMPLATE ID", "/id"),
                Column::new("NAME", "/name").capped(30),
                Column::new("ARCHIVED", "/archived"),
            ],
        }),
    },
    CommandSpec {
        path: &["types", "template-get"],
        about: "Get details of a specific template",
        positionals: &[SPACE, TYPE, TEMPLATE],
        flags: &[],
        endpoints: &[get("/v1/spaces/{}/types/{}/templates/{}")],
        view: View::Detail(DetailView {
            title: "TEMPLATE DETAILS",
            subject: "/template",
            fields: &[
                Field::new("ID", "/id"),
                Field::new("Name", "/name"),
                Field::new("Archived", "/archived"),
                ICON,
            ],
            sections: &[],
        }),
    },
    CommandSpec {
        path: &["lists", "views"],
        about: "List views for a list",
        positionals: &[SPACE, LIST],
        flags: &[],
        endpoints: &[get("/v1/spaces/{}/lists/{}/views")],
        view: View::Table(TableView {
            collection: "/data",
            noun: "views",
            columns: &[
                Column::new("VIEW ID", "/id"),
                Column::new("NAME", "/name").capped(30),
                Column::new("LAYOUT", "/layout"),
            ],
        }),
    },
    CommandSpec {
        path: &["lists", "objects"],
        about: "List objects in a view",
        positionals: &[SPACE, LIST, LIST_VIEW],
        flags: &[],
        endpoints: &[get("/v1/spaces/{}/lists/{}/views/{}/objects")],
        view: View::Table(TableView {
            collection: "/data",
            noun: "objects",
            columns: &[
                Column::new("OBJECT ID", "/id"),
                Column::new("NAME", "/name").capped(30),
                Column::new("TYPE", "/type/key").capped(20),
            ],
        }),
    },
    CommandSpec {
        path: &["lists", "add"],
        about: "Add objects to a list",
        positionals: &[
            SPACE,
            LIST,
            Positional {
                name: "objects",
                help: "Object IDs to add",
                kind: IdKind::Literal,
                target: Target::BodyList("objects"),
            },
        ],
        flags: &[],
        endpoints: &[post("/v1/spaces/{}/lists/{}/objects")],
        view: View::Summary(objects_added),
    },
    CommandSpec {
        path: &["lists", "remove"],
        about: "Remove an object from a list",
        positionals: &[SPACE, LIST, OBJECT],
        flags: &[],
        endpoints: &[delete("/v1/spaces/{}/lists/{}/objects/{}")],
        view: View::Summary(object_removed),
    },
    CommandSpec {
        path: &["search"],
        about: "Search for objects across spaces or within one space",
        positionals: &[],
        flags: &[
            Flag::new("query", "Search query string", FlagTarget::Body("query")),
            Flag::new(
                "types",
                "Filter by object type keys (comma-separated, e.g. 'page,task')",
                FlagTarget::List("types"),
            ),
            Flag::new(
                "sort",
                "Property to sort results by",
                FlagTarget::Body("sort.property_key"),
            )
            .choices(&["created_date", "last_modified_date", "last_opened_date", "name"]),
            Flag::new(
                "direction",
                "Sort direction, used with --sort",
                FlagTarget::Body("sort.direction"),
            )
            .choices(&["asc", "desc"])
            .default_value("desc")
            .only_with("sort"),
            Flag::new(
                "space",
                "Limit the search to this space (ID or name)",
                FlagTarget::Id(IdKind::Space),
            ),
        ],
        endpoints: &[post("/v1/search"), post("/v1/spaces/{}/search")],
        view: View::Table(TableView {
            collection: "/data",
            noun: "results",
            columns: &[
                Column::new("OBJECT ID", "/id"),
                Column::new("NAME", "/name").capped(30),
                Column::new("TYPE", "/type/key").capped(20),
                Column::new("SPACE ID", "/space_id"),
            ],
        }),
    },
];

/// Look up a command by its path.
pub fn find(path: &[&str]) -> Option<&'static CommandSpec> {
    COMMANDS.iter().find(|c| c.path == path)
}

/// Help text of a command group.
pub fn group_about(group: &str) -> Option<&'static str> {
    GROUPS
        .iter()
        .find(|(name, _)| *name == group)
        .map(|(_, about)| *about)
}
