mod args;
mod command;

use nvim_oxi::{Dictionary, Function, Object};
use nvimrs_quick_themes_core::Action;

#[nvim_oxi::plugin]
fn rs_quick_themes() -> Dictionary {
    let mut api = Dictionary::new();
    api.insert(
        "run",
        Function::<Dictionary, Object>::from_fn(|args| command::execute(&args, None)),
    );
    api.insert(
        "inc",
        Function::<Dictionary, Object>::from_fn(|args| command::execute(&args, Some(Action::Inc))),
    );
    api.insert(
        "dec",
        Function::<Dictionary, Object>::from_fn(|args| command::execute(&args, Some(Action::Dec))),
    );
    api.insert(
        "group",
        Function::<Dictionary, Object>::from_fn(|args| {
            command::execute(&args, Some(Action::Group))
        }),
    );
    api.insert(
        "reload",
        Function::<Dictionary, Object>::from_fn(|args| {
            command::execute(&args, Some(Action::Reload))
        }),
    );
    api
}
