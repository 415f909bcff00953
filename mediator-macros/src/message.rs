use crate::derive_utils::apply_derives;
use proc_macro::TokenStream;
use quote::{ToTokens, quote};
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::{Item, LitStr, Token, parse::Parse, parse::ParseStream, parse_macro_input};

#[derive(Clone, Copy)]
pub(crate) enum MessageRole {
    Command,
    Event,
}

impl MessageRole {
    fn attr_name(self) -> &'static str {
        match self {
            Self::Command => "command",
            Self::Event => "event",
        }
    }

    fn trait_path(self) -> proc_macro2::TokenStream {
        match self {
            Self::Command => quote!(::mediator::Command),
            Self::Event => quote!(::mediator::Event),
        }
    }
}

/// #[command] / #[event] 宏实现
/// - 合并/追加派生：Clone, Debug
/// - 实现 `::mediator::Command` 或 `::mediator::Event`，`NAME` 默认取类型名
pub(crate) fn expand(role: MessageRole, attr: TokenStream, item: TokenStream) -> TokenStream {
    let cfg = parse_macro_input!(attr as MessageAttrConfig);
    let mut input = parse_macro_input!(item as Item);

    let required: Vec<syn::Path> = vec![syn::parse_quote!(Clone), syn::parse_quote!(Debug)];
    let (ident, generics) = match &mut input {
        Item::Struct(s) => {
            apply_derives(&mut s.attrs, required);
            (s.ident.clone(), s.generics.clone())
        }
        Item::Enum(e) => {
            apply_derives(&mut e.attrs, required);
            (e.ident.clone(), e.generics.clone())
        }
        other => {
            let msg = format!("#[{}] only on struct or enum", role.attr_name());
            return syn::Error::new(other.span(), msg)
                .to_compile_error()
                .into();
        }
    };

    let name = cfg
        .name
        .map(|lit| lit.value())
        .unwrap_or_else(|| ident.to_string());
    let trait_path = role.trait_path();
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let out = quote! {
        #input

        impl #impl_generics #trait_path for #ident #ty_generics #where_clause {
            const NAME: &'static str = #name;
        }
    };

    TokenStream::from(out)
}

// 支持：#[command(name = "user.create")]
struct MessageAttrConfig {
    name: Option<LitStr>,
}

impl Parse for MessageAttrConfig {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut name: Option<LitStr> = None;

        if input.is_empty() {
            return Ok(Self { name });
        }

        let pairs: Punctuated<syn::ExprAssign, Token![,]> =
            Punctuated::<syn::ExprAssign, Token![,]>::parse_terminated(input)?;

        for assign in pairs.into_iter() {
            let key_ident = match *assign.left {
                syn::Expr::Path(p) if p.path.segments.len() == 1 => {
                    p.path.segments[0].ident.clone()
                }
                other => return Err(syn::Error::new(other.span(), "invalid attribute key")),
            };
            match key_ident.to_string().as_str() {
                "name" => {
                    if name.is_some() {
                        return Err(syn::Error::new(
                            key_ident.span(),
                            "duplicate key 'name' in attribute",
                        ));
                    }
                    let lit: LitStr = syn::parse2(assign.right.to_token_stream())?;
                    name = Some(lit);
                }
                _ => {
                    return Err(syn::Error::new(
                        key_ident.span(),
                        "unknown key, expected 'name'",
                    ));
                }
            }
        }

        Ok(Self { name })
    }
}
