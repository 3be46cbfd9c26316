use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::parse::Parser;
use syn::{
    FnArg, Ident, ItemTrait, LitStr, Pat, ReturnType, TraitItem, TraitItemFn, Type,
    parse_macro_input, spanned::Spanned,
};

#[proc_macro_attribute]
pub fn bean_model(attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemTrait);
    match expand_bean_model(attr.into(), input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

struct BeanModelOptions {
    model_name: Option<String>,
    bean_ident: Option<Ident>,
    builder_ident: Option<Ident>,
}

/// Accessors collected for one property, in first-appearance order.
struct PropertyAccessors {
    name: String,
    ty: Type,
    getter: Option<TraitItemFn>,
    setter: Option<(TraitItemFn, Ident)>,
}

impl PropertyAccessors {
    fn readable(&self) -> bool {
        self.getter.is_some()
    }

    fn writable(&self) -> bool {
        self.setter.is_some()
    }

    fn builder_method_ident(&self) -> Ident {
        if let Some(getter) = &self.getter {
            return getter.sig.ident.clone();
        }
        syn::parse_str::<Ident>(&self.name)
            .unwrap_or_else(|_| Ident::new_raw(&self.name, proc_macro2::Span::call_site()))
    }
}

enum Accessor {
    Getter { property: String, ty: Type },
    Setter { property: String, ty: Type, arg: Ident },
}

fn expand_bean_model(attr: TokenStream2, item_trait: ItemTrait) -> syn::Result<TokenStream2> {
    let options = parse_bean_model_options(attr)?;

    if !item_trait.generics.params.is_empty() || item_trait.generics.where_clause.is_some() {
        return Err(syn::Error::new_spanned(
            &item_trait.generics,
            "#[bean_model] does not support generic traits",
        ));
    }
    if !item_trait.supertraits.is_empty() {
        return Err(syn::Error::new_spanned(
            &item_trait.supertraits,
            "#[bean_model] does not support supertraits; declare every accessor on the model trait",
        ));
    }
    if item_trait.unsafety.is_some() || item_trait.auto_token.is_some() {
        return Err(syn::Error::new(
            item_trait.span(),
            "#[bean_model] requires a plain trait",
        ));
    }

    let trait_ident = item_trait.ident.clone();
    let vis = item_trait.vis.clone();
    let model_name = options
        .model_name
        .unwrap_or_else(|| trait_ident.to_string());
    let bean_ident = options
        .bean_ident
        .unwrap_or_else(|| format_ident!("{}Bean", trait_ident));
    let builder_ident = options
        .builder_ident
        .unwrap_or_else(|| format_ident!("{}Builder", trait_ident));

    let mut properties = Vec::<PropertyAccessors>::new();
    for item in &item_trait.items {
        let TraitItem::Fn(method) = item else {
            return Err(syn::Error::new(
                item.span(),
                "#[bean_model] traits may only contain accessor methods",
            ));
        };

        let accessor = classify_accessor(method)?;
        let (property, ty) = match &accessor {
            Accessor::Getter { property, ty } => (property.clone(), ty.clone()),
            Accessor::Setter { property, ty, .. } => (property.clone(), ty.clone()),
        };

        let slot = match properties.iter().position(|p| p.name == property) {
            Some(idx) => &mut properties[idx],
            None => {
                properties.push(PropertyAccessors {
                    name: property.clone(),
                    ty: ty.clone(),
                    getter: None,
                    setter: None,
                });
                properties.last_mut().ok_or_else(|| {
                    syn::Error::new(method.span(), "failed to register property")
                })?
            }
        };

        if type_key(&slot.ty) != type_key(&ty) {
            return Err(syn::Error::new(
                method.sig.span(),
                format!(
                    "Property '{}' is declared with incompatible types `{}` and `{}`",
                    property,
                    type_key(&slot.ty),
                    type_key(&ty)
                ),
            ));
        }

        match accessor {
            Accessor::Getter { .. } => {
                if slot.getter.is_some() {
                    return Err(syn::Error::new(
                        method.sig.ident.span(),
                        format!("Duplicate getter for property '{}'", property),
                    ));
                }
                slot.getter = Some(method.clone());
            }
            Accessor::Setter { arg, .. } => {
                if slot.setter.is_some() {
                    return Err(syn::Error::new(
                        method.sig.ident.span(),
                        format!("Duplicate setter for property '{}'", property),
                    ));
                }
                slot.setter = Some((method.clone(), arg));
            }
        }
    }

    if properties.is_empty() {
        return Err(syn::Error::new(
            trait_ident.span(),
            "#[bean_model] requires at least one accessor",
        ));
    }

    for property in properties.iter().filter(|p| p.writable()) {
        if property.builder_method_ident() == "build" {
            return Err(syn::Error::new(
                trait_ident.span(),
                "Property 'build' would shadow the builder's build()",
            ));
        }
    }

    let declarations = properties.iter().map(|property| {
        let name = property.name.as_str();
        let ty = &property.ty;
        let readable = property.readable();
        let writable = property.writable();
        quote! {
            .declare(
                ::rustbean::PropertyDeclaration::new(
                    #name,
                    <#ty as ::rustbean::PropertyValue>::data_type(),
                )
                .readable(#readable)
                .writable(#writable)
            )
        }
    });

    let property_names = properties.iter().map(|property| property.name.as_str());

    let mut trait_methods = Vec::<TokenStream2>::new();
    for (index, property) in properties.iter().enumerate() {
        let ty = &property.ty;
        if let Some(getter) = &property.getter {
            let sig = &getter.sig;
            trait_methods.push(quote! {
                #sig {
                    self.inner.typed_get::<#ty>(#index)
                }
            });
        }
        if let Some((setter, arg)) = &property.setter {
            let sig = &setter.sig;
            trait_methods.push(quote! {
                #sig {
                    self.inner
                        .typed_set::<#ty>(#index, ::std::option::Option::Some(#arg))
                        .expect("generated setter targets a writable slot of its declared type");
                }
            });
        }
    }

    let builder_setters = properties
        .iter()
        .enumerate()
        .filter(|(_, property)| property.writable())
        .map(|(index, property)| {
            let method = property.builder_method_ident();
            let ty = &property.ty;
            let doc = format!("Sets `{}`.", property.name);
            quote! {
                #[doc = #doc]
                pub fn #method(mut self, value: impl ::std::convert::Into<#ty>) -> Self {
                    self.inner
                        .typed_set::<#ty>(#index, ::std::option::Option::Some(value.into()))
                        .expect("generated builder setter targets a slot of its declared type");
                    self
                }
            }
        });

    let bean_doc = format!(
        "Generated implementation of [`{}`] backed by a property store.",
        trait_ident
    );
    let builder_doc = format!("Fluent builder for [`{}`].", bean_ident);

    Ok(quote! {
        #item_trait

        #[doc = #bean_doc]
        #[derive(Clone, PartialEq, Eq, Hash)]
        #vis struct #bean_ident {
            inner: ::rustbean::DynamicBean,
        }

        impl #bean_ident {
            /// Declared property names, in declaration order.
            pub const PROPERTIES: &'static [&'static str] = &[#(#property_names),*];

            /// A builder from the global factory.
            pub fn builder() -> ::rustbean::Result<#builder_ident> {
                ::rustbean::BeanFactory::global().instantiate_builder::<Self>()
            }
        }

        impl ::rustbean::BeanModel for #bean_ident {
            type Builder = #builder_ident;

            fn model_id() -> ::rustbean::ModelId {
                ::rustbean::ModelId::of::<Self>(#model_name)
            }

            fn contract() -> ::rustbean::ModelContract {
                ::rustbean::ModelContract::with_id(
                    <Self as ::rustbean::BeanModel>::model_id(),
                )
                #(#declarations)*
            }

            fn from_dynamic(inner: ::rustbean::DynamicBean) -> Self {
                Self { inner }
            }

            fn as_dynamic(&self) -> &::rustbean::DynamicBean {
                &self.inner
            }

            fn as_dynamic_mut(&mut self) -> &mut ::rustbean::DynamicBean {
                &mut self.inner
            }

            fn into_dynamic(self) -> ::rustbean::DynamicBean {
                self.inner
            }
        }

        impl #trait_ident for #bean_ident {
            #(#trait_methods)*
        }

        impl ::std::fmt::Display for #bean_ident {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::fmt::Display::fmt(&self.inner, f)
            }
        }

        impl ::std::fmt::Debug for #bean_ident {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::fmt::Debug::fmt(&self.inner, f)
            }
        }

        impl ::std::convert::From<#bean_ident> for ::rustbean::DynamicBean {
            fn from(bean: #bean_ident) -> Self {
                bean.inner
            }
        }

        #[doc = #builder_doc]
        #[derive(Debug, Clone)]
        #vis struct #builder_ident {
            inner: ::rustbean::BeanBuilder,
        }

        impl #builder_ident {
            #(#builder_setters)*

            /// A new bean holding a copy of the values set so far.
            pub fn build(&self) -> #bean_ident {
                <Self as ::rustbean::ModelBuilder>::build(self)
            }
        }

        impl ::rustbean::ModelBuilder for #builder_ident {
            type Bean = #bean_ident;

            fn from_dynamic(inner: ::rustbean::BeanBuilder) -> Self {
                Self { inner }
            }

            fn as_dynamic(&self) -> &::rustbean::BeanBuilder {
                &self.inner
            }

            fn as_dynamic_mut(&mut self) -> &mut ::rustbean::BeanBuilder {
                &mut self.inner
            }
        }
    })
}

fn classify_accessor(method: &TraitItemFn) -> syn::Result<Accessor> {
    let sig = &method.sig;
    if method.default.is_some() {
        return Err(syn::Error::new(
            method.span(),
            "Model accessors must not have a default body",
        ));
    }
    if !sig.generics.params.is_empty()
        || sig.asyncness.is_some()
        || sig.unsafety.is_some()
        || sig.constness.is_some()
        || sig.abi.is_some()
        || sig.variadic.is_some()
    {
        return Err(syn::Error::new(
            sig.span(),
            "Model accessors must be plain, non-generic methods",
        ));
    }

    let Some(receiver) = sig.receiver() else {
        return Err(syn::Error::new(
            sig.span(),
            "Model accessors take `&self` (getter) or `&mut self` (setter)",
        ));
    };
    if receiver.reference.is_none() {
        return Err(syn::Error::new(
            receiver.span(),
            "Model accessors take `self` by reference",
        ));
    }

    let method_name = sig.ident.to_string();
    let method_name = method_name.trim_start_matches("r#");

    if receiver.mutability.is_none() {
        if sig.inputs.len() != 1 {
            return Err(syn::Error::new(
                sig.inputs.span(),
                "Getters take no arguments besides `&self`",
            ));
        }
        let ReturnType::Type(_, ty) = &sig.output else {
            return Err(syn::Error::new(
                sig.span(),
                "Getters must return `Option<T>`",
            ));
        };
        let value_ty = extract_option_type(ty).ok_or_else(|| {
            syn::Error::new(ty.span(), "Getters must return `Option<T>`")
        })?;
        return Ok(Accessor::Getter {
            property: method_name.to_string(),
            ty: value_ty,
        });
    }

    let Some(property) = method_name.strip_prefix("set_").filter(|name| !name.is_empty()) else {
        return Err(syn::Error::new(
            sig.ident.span(),
            "Setters must be named `set_<property>`",
        ));
    };
    if !matches!(sig.output, ReturnType::Default) {
        return Err(syn::Error::new(
            sig.output.span(),
            "Setters must not return a value",
        ));
    }
    if sig.inputs.len() != 2 {
        return Err(syn::Error::new(
            sig.inputs.span(),
            "Setters take exactly one value argument",
        ));
    }
    let Some(FnArg::Typed(pat_type)) = sig.inputs.iter().nth(1) else {
        return Err(syn::Error::new(
            sig.inputs.span(),
            "Setters take exactly one value argument",
        ));
    };
    let Pat::Ident(pat_ident) = pat_type.pat.as_ref() else {
        return Err(syn::Error::new(
            pat_type.pat.span(),
            "Setter argument must be a plain identifier",
        ));
    };

    Ok(Accessor::Setter {
        property: property.to_string(),
        ty: pat_type.ty.as_ref().clone(),
        arg: pat_ident.ident.clone(),
    })
}

fn extract_option_type(ty: &Type) -> Option<Type> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    let segment = type_path.path.segments.last()?;
    if segment.ident != "Option" {
        return None;
    }
    first_generic_type(segment)
}

fn first_generic_type(segment: &syn::PathSegment) -> Option<Type> {
    let syn::PathArguments::AngleBracketed(arguments) = &segment.arguments else {
        return None;
    };

    for arg in &arguments.args {
        if let syn::GenericArgument::Type(ty) = arg {
            return Some(ty.clone());
        }
    }
    None
}

fn type_key(ty: &Type) -> String {
    quote!(#ty).to_string()
}

fn parse_bean_model_options(attr: TokenStream2) -> syn::Result<BeanModelOptions> {
    let mut options = BeanModelOptions {
        model_name: None,
        bean_ident: None,
        builder_ident: None,
    };

    let parser = syn::meta::parser(|meta| {
        if meta.path.is_ident("name") {
            let value = meta.value()?;
            let lit: LitStr = value.parse()?;
            if lit.value().is_empty() {
                return Err(meta.error("Model name must not be empty"));
            }
            options.model_name = Some(lit.value());
            return Ok(());
        }

        if meta.path.is_ident("bean") {
            let value = meta.value()?;
            options.bean_ident = Some(value.parse()?);
            return Ok(());
        }

        if meta.path.is_ident("builder") {
            let value = meta.value()?;
            options.builder_ident = Some(value.parse()?);
            return Ok(());
        }

        Err(meta.error(
            "Unsupported #[bean_model(...)] option. Supported: name = \"...\", bean = Ident, builder = Ident",
        ))
    });

    parser.parse2(attr)?;
    Ok(options)
}
