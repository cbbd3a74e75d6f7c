//! 页面生成模块
//!
//! 生成封面页、样式表、章节页与目录页。章节正文与自定义目录内容原样嵌入。

use crate::epub::document::{Document, Section};
use crate::epub::ncx::ContentItem;
use crate::epub::replacements::Replacements;
use quick_xml::escape::escape;

/// 基础样式表（重置与排版）
pub const BASE_CSS: &str = "@page{margin:10px}a,abbr,acronym,address,applet,article,aside,audio,b,big,blockquote,body,canvas,caption,center,cite,code,del,details,dfn,div,em,embed,fieldset,figcaption,figure,footer,form,h1,h2,h3,h4,h5,h6,header,hgroup,html,i,iframe,img,ins,kbd,label,legend,mark,menu,nav,object,output,p,pre,q,ruby,s,samp,section,small,span,strike,strong,sub,summary,sup,table,tbody,td,tfoot,th,thead,time,tr,tt,u,var,video{margin:0;padding:0;border:0;font-size:100%;vertical-align:baseline}table{border-collapse:collapse;border-spacing:0}dd,dl,dt,li,ol,ul{margin:0;padding:0;border:0;font-size:100%;vertical-align:baseline}body{text-align:justify;line-height:120%}h1{text-indent:0;text-align:center;margin:100px 0 0 0;font-size:2em;font-weight:700;page-break-before:always;line-height:150%}h2{text-indent:0;text-align:center;margin:50px 0 0 0;font-size:1.5em;font-weight:700;page-break-before:always;line-height:135%}h3{text-indent:0;text-align:left;font-size:1.4em;font-weight:700}h4{text-indent:0;text-align:left;font-size:1.2em;font-weight:700}h5{text-indent:0;text-align:left;font-size:1.1em;font-weight:700}h6{text-indent:0;text-align:left;font-size:1em;font-weight:700}h1,h2,h3,h4,h5,h6{-webkit-hyphens:none!important;hyphens:none;page-break-after:avoid;page-break-inside:avoid}p{text-indent:1.25em;margin:0;widows:2;orphans:2}p.centered{text-indent:0;margin:1em 0 0 0;text-align:center}ul{margin:1em 0 0 2em;text-align:left}ol{margin:1em 0 0 2em;text-align:left}img{max-width:100%}table{margin:1em auto}td,th,tr{margin:0;padding:2px;border:1px solid #000;font-size:100%;vertical-align:baseline}.footnote{vertical-align:super;font-size:.75em;text-decoration:none}div.blockquote{margin:1em 1.5em 0 1.5em;text-align:left;font-size:.9em}\n";

/// 从右到左语言的覆盖样式
pub const RTL_CSS: &str = "body, html {\n  text-align: right;\n  direction: rtl;\n}\n";

fn text_direction(document: &Document) -> &'static str {
    if document.is_rtl() { "rtl" } else { "auto" }
}

/// 生成封面页
pub fn cover_page(document: &Document, replacements: &Replacements) -> String {
    let mut html = String::new();
    html.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    html.push_str("<!DOCTYPE html>\n");
    html.push_str("<html xmlns=\"http://www.w3.org/1999/xhtml\" xmlns:epub=\"http://www.idpf.org/2007/ops\" xml:lang=\"[[LANGUAGE]]\" lang=\"[[LANGUAGE]]\">\n");
    html.push_str("  <head>\n");
    html.push_str("    <meta charset=\"UTF-8\"/>\n");
    html.push_str("    <title>[[TITLE]]</title>\n");
    html.push_str("    <style type=\"text/css\">\n");
    html.push_str("      body { margin: 0; padding: 0; text-align: center; }\n");
    html.push_str("      .cover { margin: 0; padding: 0; font-size: 1px; }\n");
    html.push_str("      img { margin: 0; padding: 0; height: 100%; }\n");
    html.push_str("    </style>\n");
    html.push_str("  </head>\n");
    html.push_str("  <body>\n");
    html.push_str("    <div class=\"cover\">\n");
    html.push_str(&format!(
        "      <img style=\"height: 100%; width: 100%;\" src=\"images/{}\" alt=\"Cover\"/>\n",
        escape(document.cover().name.as_str())
    ));
    html.push_str("    </div>\n");
    html.push_str("  </body>\n");
    html.push_str("</html>\n");

    replacements.apply(&html)
}

/// 生成样式表：基础样式、RTL覆盖（若需要）、自定义样式
pub fn stylesheet(document: &Document, replacements: &Replacements) -> String {
    let mut css = String::from(BASE_CSS);
    if document.is_rtl() {
        css.push_str(RTL_CSS);
    }
    css.push_str(document.css());
    css.push('\n');

    replacements.apply(&css)
}

/// 生成章节页
pub fn section_page(document: &Document, section: &Section, replacements: &Replacements) -> String {
    let title = escape(section.title.as_str());

    let mut html = String::new();
    html.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    html.push_str("<!DOCTYPE html>\n");
    html.push_str("<html xmlns=\"http://www.w3.org/1999/xhtml\" xmlns:epub=\"http://www.idpf.org/2007/ops\" xml:lang=\"[[LANGUAGE]]\" lang=\"[[LANGUAGE]]\">\n");
    html.push_str("  <head>\n");
    html.push_str("    <meta charset=\"UTF-8\"/>\n");
    html.push_str(&format!("    <title>{}</title>\n", title));
    html.push_str("    <link rel=\"stylesheet\" type=\"text/css\" href=\"../css/ebook.css\"/>\n");
    html.push_str("  </head>\n");
    html.push_str(&format!("  <body dir=\"{}\">\n", text_direction(document)));
    html.push_str(&format!("    <h1>{}</h1>\n", title));
    html.push_str("    <div class=\"content\">\n");
    html.push_str(&section.content);
    html.push_str("\n    </div>\n");
    html.push_str("  </body>\n");
    html.push_str("</html>\n");

    replacements.apply(&html)
}

/// 生成目录页
///
/// 文档提供了自定义生成函数时，以导航条目调用它并原样嵌入结果；
/// 否则列出所有未隐藏章节的链接。
pub fn contents_page(
    document: &Document,
    items: &[ContentItem],
    replacements: &Replacements,
) -> String {
    let body = match document.contents_generator() {
        Some(generator) => generator(items),
        None => default_contents(document),
    };

    let mut html = String::new();
    html.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    html.push_str("<!DOCTYPE html>\n");
    html.push_str("<html xmlns=\"http://www.w3.org/1999/xhtml\" xmlns:epub=\"http://www.idpf.org/2007/ops\" xml:lang=\"[[LANGUAGE]]\" lang=\"[[LANGUAGE]]\">\n");
    html.push_str("  <head>\n");
    html.push_str("    <meta charset=\"UTF-8\"/>\n");
    html.push_str("    <title>[[CONTENTS]]</title>\n");
    html.push_str("    <link rel=\"stylesheet\" type=\"text/css\" href=\"../css/ebook.css\"/>\n");
    html.push_str("  </head>\n");
    html.push_str(&format!("  <body dir=\"{}\">\n", text_direction(document)));
    html.push_str(&body);
    html.push_str("\n  </body>\n");
    html.push_str("</html>\n");

    replacements.apply(&html)
}

fn default_contents(document: &Document) -> String {
    let mut body = String::new();
    body.push_str("    <h1 class=\"h1\">[[CONTENTS]]</h1>\n");
    body.push_str("    <nav id=\"toc\" epub:type=\"toc\">\n");
    body.push_str("      <ol>\n");
    for section in document.sections().iter().filter(|s| !s.exclude_from_contents) {
        body.push_str(&format!(
            "        <li class=\"table-of-content\"><a href=\"{}\">{}</a></li>\n",
            escape(section.filename.as_str()),
            escape(section.title.as_str())
        ));
    }
    body.push_str("      </ol>\n");
    body.push_str("    </nav>");
    body
}
