//! Script generation for the embedded page.
//!
//! Every function here is pure and infallible: any command or text maps to a
//! complete script. User text is never spliced into script source directly; it
//! is passed as a single string literal argument to an immediately-invoked
//! function, encoded by [`js_string_literal`].

pub mod key_command;

pub use key_command::{virtual_key_code, KeyCommand, KeyStroke, UnknownCommand};

/// Delay between opening the game's find prompt and filling it in.
pub const FIND_PROMPT_DELAY_MS: u32 = 100;

/// Defines `t` (event target) and `s(stroke)` which dispatches one stroke on
/// `t` with legacy codes: keydown and keyup carry the virtual `keyCode`, and a
/// keypress carrying `charCode` follows only when the stroke types a character
/// and the keydown was not cancelled.
///
/// `keyCode`, `which` and `charCode` are read-only on `KeyboardEvent`, so they
/// are installed as own getters; the game client still reads them.
const DISPATCH_PRELUDE: &str = "var t=document.activeElement||document.body;\
function s(o){\
function f(n,k,c){\
var e=new KeyboardEvent(n,{key:o.key,code:o.code,ctrlKey:o.ctrlKey,bubbles:true,cancelable:true});\
Object.defineProperty(e,'keyCode',{get:function(){return k;}});\
Object.defineProperty(e,'which',{get:function(){return k;}});\
Object.defineProperty(e,'charCode',{get:function(){return c;}});\
return t.dispatchEvent(e);}\
if(f('keydown',o.keyCode,0)&&o.charCode){f('keypress',o.charCode,o.charCode);}\
f('keyup',o.keyCode,0);}";

/// Translates key commands and captured text into page scripts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScriptBridge;

impl ScriptBridge {
    /// Script that sends the keystroke for `command`.
    #[must_use]
    pub fn command_script(command: KeyCommand) -> String {
        stroke_script(command.stroke())
    }

    /// Script that types `text` into the page, one keystroke per character.
    ///
    /// Newlines become Enter, tabs become Tab, and an empty replacement
    /// (a deletion on the capture surface) becomes a single Backspace. Other
    /// characters press their [`virtual_key_code`] and type their own code
    /// point; the codes travel as a second argument, one per character.
    #[must_use]
    pub fn key_pressed(text: &str) -> String {
        let codes: Vec<String> = text
            .chars()
            .map(|ch| virtual_key_code(ch).to_string())
            .collect();
        format!(
            "(function(text,codes){{{prelude}\
if(text.length===0){{s({backspace});return;}}\
var i=0;\
for(var ch of text){{var k=codes[i++];\
if(ch==='\\n'||ch==='\\r'){{s({enter});}}\
else if(ch==='\\t'){{s({tab});}}\
else{{s({{key:ch,code:'',keyCode:k,charCode:ch.codePointAt(0),ctrlKey:false}});}}}}\
}})({text},[{codes}]);",
            prelude = DISPATCH_PRELUDE,
            backspace = stroke_literal(KeyStroke::BACKSPACE),
            enter = stroke_literal(KeyStroke::ENTER),
            tab = stroke_literal(KeyStroke::TAB),
            text = js_string_literal(text),
            codes = codes.join(","),
        )
    }

    /// Script that opens the find prompt, enters `text`, and confirms it.
    #[must_use]
    pub fn find_text_and_confirm(text: &str) -> String {
        format!(
            "(function(text){{{prelude}\
s({find});\
setTimeout(function(){{\
var i=document.activeElement;\
if(i&&'value' in i){{i.value=text;i.dispatchEvent(new Event('input',{{bubbles:true}}));}}\
t=i||document.body;s({enter});}},{delay});\
}})({text});",
            prelude = DISPATCH_PRELUDE,
            find = stroke_literal(KeyCommand::Find.stroke()),
            enter = stroke_literal(KeyStroke::ENTER),
            delay = FIND_PROMPT_DELAY_MS,
            text = js_string_literal(text),
        )
    }

    /// Script that dismisses the find prompt.
    #[must_use]
    pub fn cancel_find() -> String {
        stroke_script(KeyStroke::ESCAPE)
    }
}

fn stroke_script(stroke: KeyStroke) -> String {
    format!(
        "(function(){{{}s({});}})();",
        DISPATCH_PRELUDE,
        stroke_literal(stroke)
    )
}

fn stroke_literal(stroke: KeyStroke) -> String {
    format!(
        "{{key:{},code:{},keyCode:{},ctrlKey:{},charCode:{}}}",
        js_string_literal(stroke.key),
        js_string_literal(stroke.code),
        stroke.key_code,
        stroke.ctrl_key,
        stroke.char_code
    )
}

/// Encodes `text` as a double-quoted script string literal.
///
/// The output is also valid JSON, so it decodes back to `text` with any JSON
/// parser. U+2028 and U+2029 are escaped because older script engines treat
/// them as line terminators inside string literals.
#[must_use]
pub fn js_string_literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for ch in text.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0c}' => out.push_str("\\f"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c if u32::from(c) < 0x20 => out.push_str(&format!("\\u{:04x}", u32::from(c))),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
