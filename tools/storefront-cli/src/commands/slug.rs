//! Showcase slug commands.

use anyhow::Result;
use serde_json::json;
use storefront_commerce::showcase::{resolve_slug, slugify, SlugResolution};

use super::{SlugArgs, SlugCommand};
use crate::context::Context;

/// Run the slug command.
pub fn run(args: SlugArgs, ctx: &Context) -> Result<()> {
    match args.command {
        SlugCommand::Make { name } => {
            let slug = slugify(&name);
            if ctx.output.is_json() {
                ctx.output.json(&json!({ "name": name, "slug": slug }));
            } else {
                println!("{}", slug);
            }
        }
        SlugCommand::Resolve { requested } => {
            let storefront = ctx.config.storefront();
            let resolution = resolve_slug(&requested, &storefront);

            if ctx.output.is_json() {
                ctx.output.json(&resolution);
                return Ok(());
            }

            match resolution {
                SlugResolution::Canonical => ctx.output.success(&format!("/{} is canonical", requested)),
                SlugResolution::Redirect(slug) => {
                    ctx.output.info(&format!("/{} redirects to /{}", requested, slug))
                }
                SlugResolution::NotFound => anyhow::bail!("No storefront at /{}", requested),
            }
        }
    }
    Ok(())
}
