use almanac_core::{DataFormat, Registry, Value, load_registry_dir, validate};
use proc_macro::TokenStream;
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::quote;
use std::path::{Path, PathBuf};
use syn::{LitStr, parse_macro_input};

/// Embed a directory of `<tag>.<json|yaml|toml>` locale files and install
/// them as the global registry before `main` runs.
///
/// The directory is resolved against `CARGO_MANIFEST_DIR`. Malformed files,
/// bad locale tags and shape violations are compile errors.
#[proc_macro]
pub fn locale_assets(input: TokenStream) -> TokenStream {
    let dir = parse_macro_input!(input as LitStr);
    expand(&dir)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(dir: &LitStr) -> syn::Result<TokenStream2> {
    let err = |msg: String| syn::Error::new(dir.span(), msg);

    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR")
        .map_err(|e| syn::Error::new(Span::call_site(), format!("CARGO_MANIFEST_DIR: {e}")))?;
    let dir_path = Path::new(&manifest_dir).join(dir.value());
    if !dir_path.is_dir() {
        return Err(err(format!(
            "locale data directory not found: {}",
            dir_path.display()
        )));
    }

    // Track every data file so edits trigger a rebuild.
    let tracked = data_files(&dir_path)
        .map_err(err)?
        .into_iter()
        .map(|path| {
            let abs = path
                .canonicalize()
                .map_err(|e| err(format!("{}: {e}", path.display())))?;
            let abs = abs.to_string_lossy().into_owned();
            Ok(quote! { const _: &[u8] = include_bytes!(#abs); })
        })
        .collect::<syn::Result<Vec<_>>>()?;

    let registry = load_registry_dir(&dir_path).map_err(|e| err(e.to_string()))?;
    validate::ensure_valid(&registry).map_err(|e| err(e.to_string()))?;

    let tables = registry_tokens(&registry);

    Ok(quote! {
        #(#tracked)*

        #[::almanac_core::ctor::ctor(crate_path = ::almanac_core::ctor)]
        fn __almanac_install_locale_assets() {
            let mut registry = ::almanac_core::Registry::new();
            #(#tables)*
            let _ = ::almanac_core::install(registry);
        }
    })
}

/// Files under `dir` with a recognised data extension, sorted.
fn data_files(dir: &Path) -> Result<Vec<PathBuf>, String> {
    let pattern = format!("{}/*", glob::Pattern::escape(&dir.to_string_lossy()));
    let mut files = Vec::new();
    for entry in glob::glob(&pattern).map_err(|e| e.to_string())? {
        let path = entry.map_err(|e| e.to_string())?;
        if path.is_file() && DataFormat::from_path(&path).is_some() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn registry_tokens(registry: &Registry) -> Vec<TokenStream2> {
    registry
        .tables()
        .map(|table| {
            let tag = table.tag();
            let inserts = table.iter().map(|(key, value)| {
                let value = value_tokens(value);
                quote! { builder.insert(#key, #value); }
            });
            quote! {
                {
                    let mut builder = ::almanac_core::LocaleTable::builder(#tag);
                    #(#inserts)*
                    let _ = registry.add(builder.build());
                }
            }
        })
        .collect()
}

fn value_tokens(value: &Value) -> TokenStream2 {
    match value {
        Value::Text(s) => quote! { ::almanac_core::Value::text(#s) },
        Value::List(items) if items.is_empty() => {
            quote! { ::almanac_core::Value::list::<[&str; 0], &str>([]) }
        }
        Value::List(items) => {
            let items = items.iter();
            quote! { ::almanac_core::Value::list([#(#items),*]) }
        }
    }
}
