//! Default identifier lists for the strictest policy.

/// Name of the default policy.
pub const DEFAULT_POLICY_NAME: &str = "Default";

/// Default name of the global object.
pub const DEFAULT_GLOBAL_IDENTIFIER: &str = "globalThis";

/// Functions a module must declare under the default policy.
pub const DEFAULT_RESERVED_FUNCTION_IDENTIFIERS: &[&str] = &["main"];

/// Host and runtime globals that guest code must not rebind.
pub const DEFAULT_BUILT_IN_OBJECTS: &[&str] = &[
    "AbortController",
    "AbortSignal",
    "AggregateError",
    "Array",
    "ArrayBuffer",
    "Atomics",
    "BigInt",
    "BigInt64Array",
    "BigUint64Array",
    "Boolean",
    "Buffer",
    "DataView",
    "Date",
    "Decimal",
    "Error",
    "EvalError",
    "Event",
    "EventTarget",
    "FinalizationRegistry",
    "Float32Array",
    "Float64Array",
    "Function",
    "Infinity",
    "Int16Array",
    "Int32Array",
    "Int8Array",
    "Intl",
    "JSON",
    "Map",
    "Math",
    "MessageChannel",
    "MessageEvent",
    "MessagePort",
    "NaN",
    "Number",
    "Object",
    "Promise",
    "Proxy",
    "RangeError",
    "ReferenceError",
    "Reflect",
    "RegExp",
    "Set",
    "SharedArrayBuffer",
    "String",
    "Symbol",
    "SyntaxError",
    "TextDecoder",
    "TextEncoder",
    "TypeError",
    "URIError",
    "URL",
    "URLSearchParams",
    "Uint16Array",
    "Uint32Array",
    "Uint8Array",
    "Uint8ClampedArray",
    "WeakMap",
    "WeakRef",
    "WeakSet",
    "WebAssembly",
    "_",
    "_error",
    "assert",
    "async_hooks",
    "atob",
    "btoa",
    "buffer",
    "child_process",
    "clearImmediate",
    "clearInterval",
    "clearTimeout",
    "cluster",
    "console",
    "constants",
    "crypto",
    "decodeURI",
    "decodeURIComponent",
    "dgram",
    "diagnostics_channel",
    "dns",
    "domain",
    "encodeURI",
    "encodeURIComponent",
    "escape",
    "eval",
    "events",
    "fs",
    "global",
    "globalThis",
    "http",
    "http2",
    "https",
    "inspector",
    "isFinite",
    "isNaN",
    "module",
    "net",
    "os",
    "parseFloat",
    "parseInt",
    "path",
    "perf_hooks",
    "performance",
    "process",
    "punycode",
    "querystring",
    "queueMicrotask",
    "readline",
    "repl",
    "require",
    "setImmediate",
    "setInterval",
    "setTimeout",
    "stream",
    "string_decoder",
    "sys",
    "timers",
    "tls",
    "trace_events",
    "tty",
    "undefined",
    "unescape",
    "url",
    "util",
    "v8",
    "vm",
    "wasi",
    "worker_threads",
    "zlib",
];

/// Identifiers that may not appear anywhere, read or written.
pub const DEFAULT_DISALLOWED_IDENTIFIERS: &[&str] = &[
    "__proto__",
    "apply",
    "AsyncFunction",
    "AsyncGenerator",
    "AsyncGeneratorFunction",
    "bind",
    "call",
    "clearInterval",
    "clearTimeout",
    "defineProperty",
    "defineProperties",
    "eval",
    "Function",
    "global",
    "globalThis",
    "getPrototypeOf",
    "Generator",
    "GeneratorFunction",
    "Intl",
    "prototype",
    "Proxy",
    "Promise",
    "require",
    "Reflect",
    "setImmediate",
    "setInterval",
    "setTimeout",
    "setPrototypeOf",
    "Symbol",
    "uneval",
    "XMLHttpRequest",
    "WebAssembly",
    "window",
];

/// Globals the host deletes before running guest code.
pub const DEFAULT_TO_BE_DELETED_IDENTIFIERS: &[&str] = &["eval", "Function", "WebAssembly"];

/// Globals the host freezes before running guest code.
///
/// `Object` comes first: it has to be frozen before anything else.
pub const DEFAULT_TO_BE_FROZEN_IDENTIFIERS: &[&str] = &[
    "Object",
    "AggregateError",
    "Array",
    "ArrayBuffer",
    "Atomics",
    "BigInt",
    "BigInt64Array",
    "BigUint64Array",
    "Boolean",
    "DataView",
    "Date",
    "decodeURI",
    "decodeURIComponent",
    "encodeURI",
    "encodeURIComponent",
    "Error",
    "escape",
    "EvalError",
    "FinalizationRegistry",
    "Float32Array",
    "Float64Array",
    "Int8Array",
    "Int16Array",
    "Int32Array",
    "isFinite",
    "isNaN",
    "JSON",
    "Map",
    "Math",
    "Number",
    "parseFloat",
    "parseInt",
    "Promise",
    "Proxy",
    "RangeError",
    "ReferenceError",
    "Reflect",
    "RegExp",
    "Set",
    "SharedArrayBuffer",
    "String",
    "Symbol",
    "SyntaxError",
    "TypeError",
    "Uint8Array",
    "Uint8ClampedArray",
    "Uint16Array",
    "Uint32Array",
    "unescape",
    "URIError",
    "WeakMap",
    "WeakRef",
    "WeakSet",
];
