//! 测试用的归档页面样本（TEXT:LIST 格式）。

/// 两次探空：01 Jan 2021 00Z 含两个低层逆温，12Z 无逆温。
/// 每个 `<h2>` 后跟数据块与站点信息块两个 `<pre>`。
pub const ARCHIVE_PAGE: &str = r#"<HTML>
<TITLE>University of Wyoming - Radiosonde Data</TITLE>
<BODY BGCOLOR="white">
<H2>26075 ULLI St. Petersburg (Voejkovo) Observations at 00Z 01 Jan 2021</H2>
<PRE>
-----------------------------------------------------------------------------
   PRES   HGHT   TEMP   DWPT   RELH   MIXR   DRCT   SKNT   THTA   THTE   THTV
    hPa     m      C      C      %    g/kg    deg   knot     K      K      K
-----------------------------------------------------------------------------
 1012.0      4   -5.0   -7.0     86   2.23    200      6  267.2  273.6  267.6
 1000.0    101   -3.2   -5.0     87   2.62    205     10  270.0  277.6  270.5
  975.0    305   -1.0   -4.1     79   2.78    215     16  274.2  282.3  274.7
  950.0    512   -2.2   -6.0     75   2.44    225     21  275.1  282.2  275.5
  925.0    720   -3.9   -8.0     73   2.18    230     23  275.4  281.8  275.8
  900.0    934   -3.0   -9.1     63   2.03    235     25  278.5  284.5  278.8
  870.0   1190
  850.0   1372   -6.5  -12.0     65   1.70    240     27  279.4  284.5  279.7
</PRE><H3>Station information and sounding indices</H3><PRE>
                         Station identifier: ULLI
                             Station number: 26075
                           Observation time: 210101/0000
                           Station latitude: 59.95
                          Station longitude: 30.70
                          Station elevation: 4.0
</PRE>
<H2>26075 ULLI St. Petersburg (Voejkovo) Observations at 12Z 01 Jan 2021</H2>
<PRE>
-----------------------------------------------------------------------------
   PRES   HGHT   TEMP   DWPT   RELH   MIXR   DRCT   SKNT   THTA   THTE   THTV
    hPa     m      C      C      %    g/kg    deg   knot     K      K      K
-----------------------------------------------------------------------------
 1013.0      4    2.0    0.5     90   3.90    270      8  275.1  286.0  275.8
 1000.0    108    1.2   -0.3     90   3.70    275     14  275.4  285.7  276.0
  925.0    740   -3.0   -4.5     89   2.90    285     25  277.4  285.7  277.9
  850.0   1400   -7.5   -9.9     83   2.20    290     31  279.7  286.2  280.1
</PRE><H3>Station information and sounding indices</H3><PRE>
                         Station identifier: ULLI
                             Station number: 26075
                           Observation time: 210101/1200
                           Station latitude: 59.95
                          Station longitude: 30.70
                          Station elevation: 4.0
</PRE>
</BODY></HTML>
"#;

/// 归档中没有该时段数据时返回的页面
pub const EMPTY_PAGE: &str = r#"<HTML>
<TITLE>University of Wyoming - Radiosonde Data</TITLE>
<BODY BGCOLOR="white">
Can't get 26075 ULLI Observations at 00Z 01 Jan 1890.
</BODY></HTML>
"#;

/// 归档繁忙时返回的页面（HTTP 200）
pub const BUSY_PAGE: &str = r#"<HTML>
<TITLE>University of Wyoming - Radiosonde Data</TITLE>
<BODY BGCOLOR="white">
<P>Sorry, the server is too busy to process your request. Please try again later.</P>
</BODY></HTML>
"#;

/// 在本地端口上依次返回给定页面，每个连接一个页面，返回归档地址
pub fn serve_pages(pages: Vec<&'static str>) -> String {
    use std::io::{Read, Write};
    use std::net::TcpListener;

    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();

    std::thread::spawn(move || {
        for page in pages {
            let (mut stream, _) = match listener.accept() {
                Ok(conn) => conn,
                Err(_) => return,
            };

            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                match stream.read(&mut buf) {
                    Ok(0) | Err(_) => break,
                    Ok(n) => request.extend_from_slice(&buf[..n]),
                }
            }

            let response = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                page.len(),
                page
            );
            let _ = stream.write_all(response.as_bytes());
            let _ = stream.flush();
        }
    });

    format!("http://127.0.0.1:{}/cgi-bin/sounding", port)
}
